//! Field resolution: loosely keyed upstream records → [`ForecastRecord`].
//!
//! Upstream records come out of an LLM and their keys drift in case, spacing
//! and spelling ("Getij " vs "getij", "Golf hoogte" vs "Golfhoogte"). Each
//! logical field therefore lists candidate spellings; keys compare after
//! trimming, collapsing inner whitespace and lowercasing.

use serde_json::{Map, Value};

pub const LOCATION: &[&str] = &["Locatie", "Location", "Spot"];
pub const DATE: &[&str] = &["Datum", "Date"];
pub const WEEKDAY: &[&str] = &["Dag", "Day"];
pub const DAYPART: &[&str] = &["Dagdeel", "Daypart"];
pub const WIND: &[&str] = &["Wind", "Windkracht"];
pub const WIND_DIRECTION: &[&str] = &["Wind richting", "Windrichting"];
pub const TIDE: &[&str] = &["Getij", "Tij"];
pub const TIDE_SCORE: &[&str] = &["Getij score", "Getijscore", "Tij score"];
pub const WAVE_HEIGHT: &[&str] = &["Golf hoogte", "Golfhoogte", "Golven"];
pub const CLEAN: &[&str] = &["Clean"];
pub const SWELL: &[&str] = &["Swell"];
pub const PERIOD: &[&str] = &["Periode", "Period"];
pub const GO_PRO: &[&str] = &["Gaan Pro", "Pro"];
pub const GO_BEGINNER: &[&str] = &["Gaan beginner", "Beginner"];
pub const PART_SCORE: &[&str] = &["Score", "Dagdeel score"];
pub const DAY_SCORE: &[&str] = &["Dag score", "Dagscore"];

/// Canonical form of a field name.
pub fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Text of a JSON value, or `None` for null and blank values.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Resolve the first candidate spelling with a present, non-empty value.
pub fn resolve_field(record: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|candidate| {
        let wanted = normalize_key(candidate);
        record
            .iter()
            .filter(|(key, _)| normalize_key(key) == wanted)
            .find_map(|(_, value)| value_text(value))
    })
}

/// Join two optional parts with a space, omitting absent ones.
pub fn join_present(first: Option<String>, second: Option<String>) -> Option<String> {
    match (first, second) {
        (Some(a), Some(b)) => Some(format!("{} {}", a, b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Parse an upstream score, accepting a decimal comma.
pub fn parse_score(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
}

/// A raw record with every logical field resolved.
///
/// `None` means the upstream record did not supply the field; it is never
/// conflated with an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastRecord {
    pub location: Option<String>,
    pub date: Option<String>,
    pub weekday: Option<String>,
    pub daypart: Option<String>,
    pub wind: Option<String>,
    pub wind_direction: Option<String>,
    pub tide: Option<String>,
    pub tide_score: Option<String>,
    pub wave_height: Option<String>,
    pub clean: Option<String>,
    pub swell: Option<String>,
    pub period: Option<String>,
    pub go_pro: Option<String>,
    pub go_beginner: Option<String>,
    pub score: Option<String>,
    pub day_score: Option<String>,
}

impl ForecastRecord {
    pub fn from_raw(record: &Map<String, Value>) -> Self {
        Self {
            location: resolve_field(record, LOCATION),
            date: resolve_field(record, DATE),
            weekday: resolve_field(record, WEEKDAY),
            daypart: resolve_field(record, DAYPART),
            wind: resolve_field(record, WIND),
            wind_direction: resolve_field(record, WIND_DIRECTION),
            tide: resolve_field(record, TIDE),
            tide_score: resolve_field(record, TIDE_SCORE),
            wave_height: resolve_field(record, WAVE_HEIGHT),
            clean: resolve_field(record, CLEAN),
            swell: resolve_field(record, SWELL),
            period: resolve_field(record, PERIOD),
            go_pro: resolve_field(record, GO_PRO),
            go_beginner: resolve_field(record, GO_BEGINNER),
            score: resolve_field(record, PART_SCORE),
            day_score: resolve_field(record, DAY_SCORE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_keys_are_case_and_whitespace_insensitive() {
        for key in ["Wind", " wind ", "WIND"] {
            let mut record = Map::new();
            record.insert(key.to_string(), json!("15kt"));
            assert_eq!(resolve_field(&record, WIND).as_deref(), Some("15kt"), "{:?}", key);
        }
        let record = object(json!({ "wind   RICHTING": "ZW" }));
        assert_eq!(resolve_field(&record, WIND_DIRECTION).as_deref(), Some("ZW"));
    }

    #[test]
    fn test_first_present_candidate_wins() {
        let record = object(json!({ "Golf hoogte": null, "Golfhoogte": "1-1,5m" }));
        assert_eq!(resolve_field(&record, WAVE_HEIGHT).as_deref(), Some("1-1,5m"));

        let record = object(json!({ "Golf hoogte": "heuphoogte", "Golven": "flat" }));
        assert_eq!(resolve_field(&record, WAVE_HEIGHT).as_deref(), Some("heuphoogte"));
    }

    #[test]
    fn test_empty_and_null_are_missing() {
        let record = object(json!({ "Clean": "", "Swell": "   ", "Periode": null }));
        assert_eq!(resolve_field(&record, CLEAN), None);
        assert_eq!(resolve_field(&record, SWELL), None);
        assert_eq!(resolve_field(&record, PERIOD), None);
        assert_eq!(resolve_field(&record, GO_PRO), None);
    }

    #[test]
    fn test_tide_does_not_match_tide_score() {
        let record = object(json!({ "Getij score": "Goed" }));
        assert_eq!(resolve_field(&record, TIDE), None);
        assert_eq!(resolve_field(&record, TIDE_SCORE).as_deref(), Some("Goed"));

        let record = object(json!({ "Getij ": "opkomend" }));
        assert_eq!(resolve_field(&record, TIDE).as_deref(), Some("opkomend"));
    }

    #[test]
    fn test_scalar_values_are_stringified() {
        let record = object(json!({ "Periode": 9, "Clean": true, "Swell": 1.5 }));
        assert_eq!(resolve_field(&record, PERIOD).as_deref(), Some("9"));
        assert_eq!(resolve_field(&record, CLEAN).as_deref(), Some("true"));
        assert_eq!(resolve_field(&record, SWELL).as_deref(), Some("1.5"));
    }

    #[test]
    fn test_join_present() {
        assert_eq!(
            join_present(Some("15kt".into()), Some("ZW".into())).as_deref(),
            Some("15kt ZW")
        );
        assert_eq!(join_present(Some("15kt".into()), None).as_deref(), Some("15kt"));
        assert_eq!(join_present(None, Some("ZW".into())).as_deref(), Some("ZW"));
        assert_eq!(join_present(None, None), None);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("7"), Some(7.0));
        assert_eq!(parse_score(" 6,5 "), Some(6.5));
        assert_eq!(parse_score("goed"), None);
        assert_eq!(parse_score("NaN"), None);
    }

    #[test]
    fn test_from_raw() {
        let record = object(json!({
            "Datum": "2025-08-19",
            "Dag": "Dinsdag",
            "Locatie": "Scheveningen",
            "Dagdeel": "Ochtend",
            "Wind": "3-4 bft",
            "Wind richting": "ZW",
            "Gaan beginner": "vanaf 9u"
        }));
        let parsed = ForecastRecord::from_raw(&record);
        assert_eq!(parsed.location.as_deref(), Some("Scheveningen"));
        assert_eq!(parsed.date.as_deref(), Some("2025-08-19"));
        assert_eq!(parsed.weekday.as_deref(), Some("Dinsdag"));
        assert_eq!(parsed.daypart.as_deref(), Some("Ochtend"));
        assert_eq!(parsed.go_beginner.as_deref(), Some("vanaf 9u"));
        assert_eq!(parsed.go_pro, None);
        assert_eq!(parsed.tide, None);
    }
}
