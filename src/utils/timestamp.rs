//! Lenient timestamp parsing for upstream payloads
//!
//! The upstream API reports instants either as epoch milliseconds or as
//! RFC 3339 strings depending on the endpoint. Both are accepted here and
//! normalized to `DateTime<Utc>`. ISO strings without an offset are read as UTC.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

impl RawTimestamp {
    fn into_datetime(self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(ms).single(),
            RawTimestamp::Float(ms) => Utc.timestamp_millis_opt(ms as i64).single(),
            RawTimestamp::Text(s) => parse_timestamp(&s),
        }
    }
}

/// Offset-less layouts, tried after RFC 3339
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an RFC 3339 string, an offset-less ISO string (as UTC), or a
/// string of epoch milliseconds
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ms) = s.parse::<i64>() {
        return Utc.timestamp_millis_opt(ms).single();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Required timestamp field
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawTimestamp::deserialize(deserializer)?;
    raw.into_datetime()
        .ok_or_else(|| serde::de::Error::custom("invalid timestamp"))
}

/// Optional timestamp field; `null`, missing and unparseable values become `None`
pub mod option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
        Ok(raw.and_then(RawTimestamp::into_datetime))
    }
}
