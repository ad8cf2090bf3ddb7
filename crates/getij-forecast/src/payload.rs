//! Decoding of `body_processed` into raw forecast records.

use serde_json::Value;

use crate::aggregate::build_model;
use crate::types::{ForecastError, ForecastModel, LatestRow};

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a `body_processed` value into its records.
///
/// Strings are parsed as JSON first. Anything that does not end up as a
/// JSON array is an error.
pub fn decode_records(body: Value) -> Result<Vec<Value>, ForecastError> {
    let decoded = match body {
        Value::String(text) => serde_json::from_str::<Value>(text.trim()).map_err(|e| {
            ForecastError::Payload(format!("body_processed is not valid JSON: {}", e))
        })?,
        other => other,
    };

    match decoded {
        Value::Array(records) => Ok(records),
        other => Err(ForecastError::Payload(format!(
            "expected a JSON array of forecast records, got {}",
            shape_name(&other)
        ))),
    }
}

/// Decode and aggregate the body of the latest row.
///
/// A missing row or a row without `body_processed` is an empty model.
pub fn model_from_row(row: Option<&LatestRow>) -> Result<ForecastModel, ForecastError> {
    match row.and_then(|r| r.body_processed.clone()) {
        Some(body) => Ok(build_model(&decode_records(body)?)),
        None => Ok(ForecastModel::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_string_array() {
        let body = json!(r#"[{"Locatie": "Texel", "Datum": "2025-08-18"}]"#);
        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Locatie"], "Texel");
    }

    #[test]
    fn test_decode_already_decoded_array() {
        let records = decode_records(json!([{"Datum": "2025-08-18"}, {}])).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_records(json!("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_object_payload_is_an_error() {
        let err = decode_records(json!(r#"{"Locatie": "Texel"}"#)).unwrap_err();
        assert!(matches!(err, ForecastError::Payload(_)));
        assert!(err.to_string().contains("an object"));

        let err = decode_records(json!({"Locatie": "Texel"})).unwrap_err();
        assert!(matches!(err, ForecastError::Payload(_)));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = decode_records(json!("Scheveningen: 1m, ZW 4")).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_scalar_payload_is_an_error() {
        assert!(decode_records(json!(12)).is_err());
        assert!(decode_records(json!("\"text\"")).is_err());
    }

    #[test]
    fn test_model_from_missing_row() {
        assert!(model_from_row(None).unwrap().is_empty());
        assert!(model_from_row(Some(&LatestRow::default())).unwrap().is_empty());
    }

    #[test]
    fn test_model_from_row() {
        let row = LatestRow {
            timestamp: Some("2025-08-18T06:00:00+00:00".into()),
            body_processed: Some(json!(
                r#"[{"Locatie": "Texel", "Datum": "2025-08-19"}, {"Locatie": "Texel", "Datum": "2025-08-18"}]"#
            )),
        };
        let model = model_from_row(Some(&row)).unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(model.locations()[0].days.len(), 2);
        assert_eq!(model.locations()[0].days[0].label, "ma 18 aug");
    }
}
