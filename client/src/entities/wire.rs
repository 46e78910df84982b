//! Lenient decoders for ids and timestamps.
//!
//! The API documents ids as strings and instants as RFC 3339, but some
//! deployments send the raw database integer or a timestamp without offset
//! (taken as UTC). Both decode to the same value.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
        })
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(D::Error::custom)
}

pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_timestamp(&raw).map_err(D::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Record {
        #[serde(deserialize_with = "super::string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "super::optional_string_or_number")]
        parent: Option<String>,
        #[serde(deserialize_with = "super::timestamp")]
        at: DateTime<Utc>,
        #[serde(default, deserialize_with = "super::optional_timestamp")]
        until: Option<DateTime<Utc>>,
    }

    #[test]
    fn integers_and_strings_decode_alike() {
        let text: Record =
            serde_json::from_str(r#"{"id": "42", "parent": "7", "at": "2024-05-01T10:00:00Z"}"#)
                .unwrap();
        let number: Record =
            serde_json::from_str(r#"{"id": 42, "parent": 7, "at": "2024-05-01T10:00:00Z"}"#)
                .unwrap();
        assert_eq!(text.id, number.id);
        assert_eq!(text.parent, number.parent);

        let null: Record =
            serde_json::from_str(r#"{"id": 1, "parent": null, "at": "2024-05-01T10:00:00Z"}"#)
                .unwrap();
        assert_eq!(null.parent, None);
        assert_eq!(null.until, None);
    }

    #[test]
    fn timestamps_without_offset_are_utc() {
        let record: Record = serde_json::from_str(
            r#"{"id": 1, "at": "2024-05-01T10:00:00.250000", "until": "2024-05-08T10:00:00"}"#,
        )
        .unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(record.at, expected);
        assert_eq!(
            record.until,
            Some(Utc.with_ymd_and_hms(2024, 5, 8, 10, 0, 0).unwrap())
        );

        let offset: Record =
            serde_json::from_str(r#"{"id": 1, "at": "2024-05-01T12:00:00+02:00"}"#).unwrap();
        assert_eq!(offset.at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn other_shapes_are_rejected() {
        assert!(
            serde_json::from_str::<Record>(r#"{"id": true, "at": "2024-05-01T10:00:00Z"}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<Record>(r#"{"id": 1.5, "at": "2024-05-01T10:00:00Z"}"#)
                .is_err()
        );
        assert!(serde_json::from_str::<Record>(r#"{"id": 1, "at": "yesterday"}"#).is_err());
    }
}
