//! The timestamped wrapper persisted to each cache file

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Wrapper stored on disk around fetched data
///
/// Serializes as `{ "fetchedAt": "...", "data": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEnvelope<T> {
    /// When the run that produced this envelope started fetching
    #[serde(rename = "fetchedAt", serialize_with = "serialize_timestamp")]
    pub fetched_at: DateTime<Utc>,
    /// The fetched document, or a mapping of documents
    pub data: T,
}

impl<T> CacheEnvelope<T> {
    pub fn new(fetched_at: DateTime<Utc>, data: T) -> Self {
        Self { fetched_at, data }
    }
}

/// Formats a timestamp as ISO-8601 UTC with millisecond precision,
/// e.g. `2026-10-19T08:15:30.123Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(timestamp))
}
