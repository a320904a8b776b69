//! One end-to-end refresh of the WEAO cache
//!
//! Fetches every endpoint in order, then writes `versions.json` and
//! `executors.json` stamped with a single timestamp. The first failure aborts
//! the run before anything is written.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

use crate::cache::{CacheEnvelope, CacheManager, EXECUTORS_FILE, VERSIONS_FILE};
use crate::client::WeaoClient;
use crate::endpoints::Endpoints;
use crate::error::RefreshError;

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RefreshReport {
    /// Timestamp written to both cache files
    pub fetched_at: DateTime<Utc>,
    /// Cache files that were written
    pub files: Vec<PathBuf>,
}

/// Refreshes the cache files from the WEAO API
#[derive(Debug, Clone)]
pub struct Refresher {
    client: WeaoClient,
    endpoints: Endpoints,
    cache: CacheManager,
}

impl Refresher {
    /// Creates a Refresher from its parts
    pub fn new(client: WeaoClient, endpoints: Endpoints, cache: CacheManager) -> Self {
        Self {
            client,
            endpoints,
            cache,
        }
    }

    /// Production setup: WEAO endpoints, `.well-known/weao` under the working directory
    pub fn for_current_dir() -> Result<Self, RefreshError> {
        Ok(Self::new(
            WeaoClient::new()?,
            Endpoints::weao(),
            CacheManager::from_current_dir()?,
        ))
    }

    /// Performs one refresh run
    ///
    /// # Returns
    /// * `Ok(RefreshReport)` - Both files were written
    /// * `Err(RefreshError)` - The first failure; cache files are left as they were
    ///   unless the failure happened while replacing them
    pub async fn run(&self) -> Result<RefreshReport, RefreshError> {
        info!(dir = %self.cache.cache_dir().display(), "refreshing WEAO cache");
        self.cache.ensure_dir()?;

        let fetched_at = Utc::now();

        // Keys come out sorted, which matches the fetch order current, future, past
        let mut versions = BTreeMap::new();
        for endpoint in &self.endpoints.versions {
            info!(name = endpoint.name, url = %endpoint.url, "fetching versions");
            let document = self.client.fetch_json(&endpoint.url).await?;
            versions.insert(endpoint.name, document);
        }

        info!(url = %self.endpoints.executors, "fetching executor status");
        let executors: Value = self.client.fetch_json(&self.endpoints.executors).await?;

        let files = [
            (
                VERSIONS_FILE,
                self.cache
                    .render(VERSIONS_FILE, &CacheEnvelope::new(fetched_at, versions))?,
            ),
            (
                EXECUTORS_FILE,
                self.cache
                    .render(EXECUTORS_FILE, &CacheEnvelope::new(fetched_at, executors))?,
            ),
        ];
        let files = self.cache.write_all(&files)?;

        Ok(RefreshReport { fetched_at, files })
    }
}
