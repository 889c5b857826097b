//! Lenient decoding for request bodies posted straight from browser forms.
//!
//! Form inputs arrive as strings: `"12"` for a number, `"2024-01-01T10:30"`
//! for a `datetime-local`. Blank strings count as absent.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number or a numeric string.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(de::Error::custom(format!("invalid number: {:?}", text))),
            }
        }
    }
}

/// Accepts RFC 3339, or a date-time without offset which is taken as UTC.
pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse_timestamp(text)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid date-time: {:?}", text)))
}

pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = "2024-01-01T10:30:00+00:00";
        for text in [
            "2024-01-01T10:30",
            "2024-01-01T10:30:00",
            "2024-01-01T10:30:00.000Z",
            "2024-01-01T16:00:00+05:30",
        ] {
            let ts = parse_timestamp(text).unwrap();
            assert_eq!(ts.to_rfc3339(), expected, "{}", text);
        }
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-01-01").is_none());
    }

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "optional_number")]
        value: Option<f64>,
    }

    #[test]
    fn test_optional_number_accepts_strings() {
        let parse = |body: &str| serde_json::from_str::<Form>(body).map(|f| f.value);

        assert_eq!(parse(r#"{"value": 12}"#).unwrap(), Some(12.0));
        assert_eq!(parse(r#"{"value": " 12.5 "}"#).unwrap(), Some(12.5));
        assert_eq!(parse(r#"{"value": ""}"#).unwrap(), None);
        assert_eq!(parse(r#"{"value": null}"#).unwrap(), None);
        assert_eq!(parse("{}").unwrap(), None);
        assert!(parse(r#"{"value": "twelve"}"#).is_err());
        assert!(parse(r#"{"value": "NaN"}"#).is_err());
    }
}
