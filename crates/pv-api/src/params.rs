//! Query-string helpers.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize as _, Deserializer, de};

/// Parse an RFC 3339 timestamp, or a zone-less ISO-8601 date-time which is
/// read as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .or_else(|_| {
      NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
    })
}

/// `deserialize_with` adapter for optional timestamps in query strings.
pub fn optional_timestamp<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
  D: Deserializer<'de>,
{
  Option::<String>::deserialize(d)?
    .map(|s| parse_timestamp(&s).map_err(de::Error::custom))
    .transpose()
}
