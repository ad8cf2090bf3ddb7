//! Status line shown above every frame.

use getij_forecast::{ForecastError, LatestRow};

pub const LOADING: &str = "Laden…";
pub const UNKNOWN_TIME: &str = "onbekend";
pub const PERMISSION_HINT: &str = " (Bestaat de functie en heeft 'anon' EXECUTE?)";

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

impl Status {
    pub fn loading() -> Self {
        Self {
            message: LOADING.to_string(),
            is_error: false,
        }
    }

    /// Status after a successful fetch; `None` means the RPC returned no row.
    pub fn updated(row: Option<&LatestRow>) -> Self {
        let message = match row {
            Some(row) => format!("Laatste update: {}", format_timestamp(row)),
            None => format!("Geen data (laatste update: {})", UNKNOWN_TIME),
        };
        Self {
            message,
            is_error: false,
        }
    }

    /// Status after a failed fetch. Errors naming the RPC get a permission hint.
    pub fn failed(error: &ForecastError, rpc_name: &str) -> Self {
        let hint = if error.mentions_function(rpc_name) {
            PERMISSION_HINT
        } else {
            ""
        };
        Self {
            message: format!("Fout: {}{}", error, hint),
            is_error: true,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Local-time rendering of the row timestamp.
///
/// Unparseable timestamps are shown as received.
pub fn format_timestamp(row: &LatestRow) -> String {
    match (row.timestamp_local(), row.timestamp.as_deref()) {
        (Some(ts), _) => ts.format(TIMESTAMP_FORMAT).to_string(),
        (None, Some(raw)) if !raw.trim().is_empty() => raw.trim().to_string(),
        _ => UNKNOWN_TIME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(timestamp: Option<&str>) -> LatestRow {
        LatestRow {
            timestamp: timestamp.map(str::to_string),
            body_processed: None,
        }
    }

    #[test]
    fn test_updated_with_naive_timestamp() {
        let status = Status::updated(Some(&row(Some("2025-08-18T07:05:09"))));
        assert_eq!(status.message, "Laatste update: 18-08-2025 07:05:09");
        assert!(!status.is_error);
    }

    #[test]
    fn test_updated_without_timestamp() {
        let status = Status::updated(Some(&row(None)));
        assert_eq!(status.message, "Laatste update: onbekend");
    }

    #[test]
    fn test_updated_with_garbage_timestamp() {
        let status = Status::updated(Some(&row(Some("gisteren"))));
        assert_eq!(status.message, "Laatste update: gisteren");
    }

    #[test]
    fn test_no_row_is_not_an_error() {
        let status = Status::updated(None);
        assert!(!status.is_error);
        assert!(status.message.starts_with("Geen data"));
    }

    #[test]
    fn test_failed_with_permission_hint() {
        let err = ForecastError::Rpc {
            status: 401,
            code: Some("42501".into()),
            message: "permission denied for function get_latest_sms".into(),
        };
        let status = Status::failed(&err, "get_latest_sms");
        assert!(status.is_error);
        assert_eq!(
            status.message,
            format!("Fout: permission denied for function get_latest_sms{}", PERMISSION_HINT)
        );
    }

    #[test]
    fn test_failed_without_hint() {
        let err = ForecastError::Payload("expected a JSON array".into());
        let status = Status::failed(&err, "get_latest_sms");
        assert_eq!(status.message, "Fout: Parse error: expected a JSON array");
        assert_eq!(status.to_string(), status.message);
    }
}
