//! Cache module for writing fetched API documents to disk
//!
//! This module provides a cache manager that persists timestamped envelopes as
//! pretty-printed JSON files in the directory the static site serves from.
//! Files are staged next to their final names and only swapped in once every
//! file of a run has been written.

mod envelope;
mod manager;

pub use envelope::{format_timestamp, CacheEnvelope};
pub use manager::{CacheManager, EXECUTORS_FILE, VERSIONS_FILE};
