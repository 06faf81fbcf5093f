//! Timestamp normalization at the store boundary.
//!
//! The backing store interchangeably returns its native timestamp wrapper
//! and plain date values for the same logical field. Every model date field
//! funnels through [`datetime`] here, so join and aggregate code only ever
//! sees [`DateTime<Utc>`] and never branches on wire representation.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Wire shapes accepted for a date field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    /// Store-native wrapper as written by server-side SDKs.
    Native {
        seconds: i64,
        #[serde(default)]
        nanoseconds: u32,
    },
    /// Store-native wrapper as serialized by client SDKs.
    Client {
        #[serde(rename = "_seconds")]
        seconds: i64,
        #[serde(rename = "_nanoseconds", default)]
        nanoseconds: u32,
    },
    /// RFC 3339 datetime or a plain `YYYY-MM-DD` date.
    Text(String),
    /// Milliseconds since the Unix epoch.
    Millis(i64),
}

/// Deserialize any accepted wire shape into a UTC datetime.
///
/// Use with `#[serde(deserialize_with = "crate::normalize::datetime")]` on
/// model date fields.
pub fn datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawTimestamp::deserialize(deserializer)?;
    from_raw(raw).map_err(serde::de::Error::custom)
}

fn from_raw(raw: RawTimestamp) -> Result<DateTime<Utc>, String> {
    match raw {
        RawTimestamp::Native {
            seconds,
            nanoseconds,
        }
        | RawTimestamp::Client {
            seconds,
            nanoseconds,
        } => Utc
            .timestamp_opt(seconds, nanoseconds)
            .single()
            .ok_or_else(|| format!("timestamp out of range: {seconds}s {nanoseconds}ns")),
        RawTimestamp::Text(text) => parse_text(&text),
        RawTimestamp::Millis(millis) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| format!("epoch milliseconds out of range: {millis}")),
    }
}

fn parse_text(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // Plain dates resolve to midnight UTC.
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|date| Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
        .map_err(|_| format!("unrecognized date value: `{text}`"))
}
