use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Shown in place of a display field the upstream record did not supply.
pub const PLACEHOLDER: &str = "—";

/// Location used for records without a `Locatie`.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// Daypart used for records without a `Dagdeel`.
pub const GENERAL_DAYPART: &str = "General";

/// The single row returned by the latest-row RPC
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestRow {
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Either a JSON-encoded string or an already decoded JSON value
    #[serde(default)]
    pub body_processed: Option<serde_json::Value>,
}

impl LatestRow {
    /// Body as display text: strings verbatim, other JSON pretty printed.
    pub fn body_text(&self) -> Option<String> {
        match self.body_processed.as_ref()? {
            serde_json::Value::String(text) => Some(text.clone()),
            other => serde_json::to_string_pretty(other).ok(),
        }
    }

    /// Row timestamp in local time.
    ///
    /// Accepts RFC 3339 and offset-less timestamps; the latter are read as local time.
    pub fn timestamp_local(&self) -> Option<DateTime<Local>> {
        let raw = self.timestamp.as_deref()?.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Local));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
    }
}

/// One daypart of one day, ready to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaypartEntry {
    pub name: String,
    /// Wind speed and direction, e.g. "15kt ZW"
    pub wind: String,
    /// Tide label and tide score, e.g. "Opkomend Goed"
    pub tide: String,
    pub wave_height: String,
    pub clean: String,
    pub swell: String,
    pub period: String,
    /// Advice for experienced surfers; omitted when absent
    pub go_pro: Option<String>,
    /// Advice for beginners; omitted when absent
    pub go_beginner: Option<String>,
    /// Upstream score for this daypart, never computed locally
    pub score: Option<f64>,
}

/// All dayparts of one calendar date at one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Upstream `Dag` or the short Dutch weekday derived from the date
    pub weekday: String,
    pub date: NaiveDate,
    /// Short display label, e.g. "di 19 aug"
    pub label: String,
    /// Upstream day score, never computed locally
    pub score: Option<f64>,
    /// Dayparts in encounter order
    pub parts: Vec<DaypartEntry>,
}

/// One surf spot with its days in ascending date order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    pub days: Vec<DayEntry>,
}

/// Normalized location → day → daypart tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastModel(pub Vec<LocationEntry>);

impl ForecastModel {
    pub fn locations(&self) -> &[LocationEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocationEntry> {
        self.0.iter()
    }

    /// Location names in model order
    pub fn location_names(&self) -> Vec<&str> {
        self.0.iter().map(|l| l.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ForecastModel {
    type Item = &'a LocationEntry;
    type IntoIter = std::slice::Iter<'a, LocationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Forecast feed errors
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// PostgREST rejected the call; `message` is the server's own message
    #[error("{message}")]
    Rpc {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Parse error: {0}")]
    Payload(String),
}

impl ForecastError {
    /// Whether the error message points at the RPC itself (missing function
    /// or missing EXECUTE grant).
    pub fn mentions_function(&self, rpc_name: &str) -> bool {
        let message = self.to_string().to_lowercase();
        let rpc_name = rpc_name.to_lowercase();
        message.contains(&format!("function {}", rpc_name))
            || message.contains(&format!("function public.{}", rpc_name))
    }
}
