//! Column encoding shared by the repositories.
//!
//! Identifiers are stored as hyphenated UUID text and timestamps as
//! fixed-width RFC 3339 text with microsecond precision, so that text
//! ordering matches chronological ordering.

use std::str::FromStr;

use chrono::SecondsFormat;

use nutrihub_domain::time::Timestamp;

pub(crate) fn encode_ts(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_ts(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Parse any `FromStr` column value (ids, status enums).
pub(crate) fn decode<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(value).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Convert a row count or offset to the signed integer `SQLite` binds.
pub(crate) fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert a `COUNT(*)` result back to an unsigned total.
pub(crate) fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}
