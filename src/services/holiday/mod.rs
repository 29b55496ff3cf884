//! Holiday source: where the run's `HolidaySet` comes from.

pub mod fetcher;

use serde_json::Value;
use thiserror::Error;

use crate::models::holiday::HolidaySet;
use crate::utils::date::parse_iso_key;

pub use fetcher::HolidayFetcher;

#[derive(Debug, Error)]
pub enum HolidayError {
    #[error("Holidays URL must use http or https: {0}")]
    InvalidUrl(String),

    #[error("Network error while fetching holidays: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Holiday fetch failed with HTTP status {0}")]
    Status(u16),

    #[error("Holiday response too large ({size} bytes > {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("Failed to decode holiday response: {0}")]
    Decode(String),
}

/// Anything that can produce the holiday snapshot for a run.
#[cfg_attr(test, mockall::automock)]
pub trait HolidaySource {
    fn fetch_holidays(&self) -> Result<HolidaySet, HolidayError>;
}

/// Decode the endpoint payload: a JSON object of `YYYY-MM-DD` to name.
///
/// Keys that are not ISO dates are dropped with a warning; any value that is
/// not a string fails the whole payload.
pub fn parse_holidays(body: &str) -> Result<HolidaySet, HolidayError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| HolidayError::Decode(e.to_string()))?;

    let object = match value {
        Value::Object(map) => map,
        other => {
            return Err(HolidayError::Decode(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut entries = Vec::with_capacity(object.len());
    for (key, value) in object {
        let name = match value {
            Value::String(name) => name,
            other => {
                return Err(HolidayError::Decode(format!(
                    "holiday name for {} is {}, expected a string",
                    key,
                    json_kind(&other)
                )))
            }
        };

        if parse_iso_key(&key).is_none() {
            log::warn!("Skipping holiday entry with non-ISO key {:?}", key);
            continue;
        }

        entries.push((key, name));
    }

    Ok(entries.into_iter().collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint_payload() {
        let body = r#"{"2024-01-01":"元日","2024-01-08":"成人の日","2024-02-23":"天皇誕生日"}"#;
        let holidays = parse_holidays(body).unwrap();
        assert_eq!(holidays.len(), 3);
        assert_eq!(holidays.name_for_key("2024-01-08"), Some("成人の日"));
    }

    #[test]
    fn test_parse_empty_object() {
        let holidays = parse_holidays("{}").unwrap();
        assert!(holidays.is_empty());
    }

    #[test]
    fn test_parse_skips_non_iso_keys() {
        let holidays = parse_holidays(r#"{"someday":"x","2024-01-01":"元日"}"#).unwrap();
        assert_eq!(holidays.len(), 1);
        assert!(holidays.contains_key("2024-01-01"));
    }

    #[test]
    fn test_parse_rejects_array() {
        let err = parse_holidays(r#"["2024-01-01"]"#).unwrap_err();
        assert!(matches!(err, HolidayError::Decode(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_parse_rejects_non_string_name() {
        let err = parse_holidays(r#"{"2024-01-01": 1}"#).unwrap_err();
        assert!(matches!(err, HolidayError::Decode(_)));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_holidays("{\"2024-01-01\":"),
            Err(HolidayError::Decode(_))
        ));
    }
}
