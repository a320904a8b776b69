//! Cache manager for persisting fetched documents to disk
//!
//! Provides a `CacheManager` that writes serializable envelopes as
//! pretty-printed JSON files under `.well-known/weao`.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::RefreshError;

/// Destination directory relative to the working directory
const CACHE_SUBDIR: [&str; 2] = [".well-known", "weao"];

/// File holding the `current`, `future` and `past` version documents
pub const VERSIONS_FILE: &str = "versions.json";

/// File holding the executor status document
pub const EXECUTORS_FILE: &str = "executors.json";

/// Manages writing cache files to the destination directory
///
/// Only the files named in a write are created or replaced; anything else in
/// the directory is left alone.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a CacheManager for `.well-known/weao` under the current working directory
    pub fn from_current_dir() -> Result<Self, RefreshError> {
        let cwd = std::env::current_dir().map_err(|e| RefreshError::filesystem(".", e))?;
        Ok(Self::with_base(&cwd))
    }

    /// Creates a CacheManager for `.well-known/weao` under `base`
    pub fn with_base(base: &Path) -> Self {
        let cache_dir = CACHE_SUBDIR
            .iter()
            .fold(base.to_path_buf(), |dir, part| dir.join(part));
        Self { cache_dir }
    }

    /// Creates a CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory the cache files are written to
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to a cache file
    pub fn cache_path(&self, file_name: &str) -> PathBuf {
        self.cache_dir.join(file_name)
    }

    /// Hidden sibling a file is staged in before it replaces the real one
    fn staging_path(&self, file_name: &str) -> PathBuf {
        self.cache_dir.join(format!(".{}.tmp", file_name))
    }

    /// Ensures the cache directory exists, creating parents as needed
    pub fn ensure_dir(&self) -> Result<(), RefreshError> {
        fs::create_dir_all(&self.cache_dir)
            .map_err(|e| RefreshError::filesystem(&self.cache_dir, e))
    }

    /// Serializes `data` as 2-space indented JSON for the file `file_name`
    pub fn render<T: Serialize>(&self, file_name: &str, data: &T) -> Result<String, RefreshError> {
        serde_json::to_string_pretty(data).map_err(|source| RefreshError::EncodeError {
            path: self.cache_path(file_name),
            source,
        })
    }

    /// Writes every `(file_name, contents)` pair, replacing existing files
    ///
    /// All files are staged first. The real files are only replaced once
    /// every staged write succeeded, so a failure while staging leaves the
    /// previous cache untouched.
    ///
    /// # Returns
    /// * `Ok(paths)` - The final paths, in input order
    /// * `Err(RefreshError::FilesystemError)` - A write or rename failed
    pub fn write_all(&self, files: &[(&str, String)]) -> Result<Vec<PathBuf>, RefreshError> {
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());

        for (file_name, contents) in files {
            let staging = self.staging_path(file_name);
            if let Err(e) = fs::write(&staging, contents) {
                // The failed staging file may exist partially written
                self.discard(
                    staged
                        .iter()
                        .map(|(path, _)| path.as_path())
                        .chain(std::iter::once(staging.as_path())),
                );
                return Err(RefreshError::filesystem(staging, e));
            }
            debug!(path = %staging.display(), "staged cache file");
            staged.push((staging, self.cache_path(file_name)));
        }

        let mut written = Vec::with_capacity(staged.len());
        for (index, (staging, target)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(staging, target) {
                self.discard(staged[index..].iter().map(|(path, _)| path.as_path()));
                return Err(RefreshError::filesystem(target, e));
            }
            written.push(target.clone());
        }

        Ok(written)
    }

    /// Removes staging files left behind by a failed write
    fn discard<'a>(&self, staged: impl IntoIterator<Item = &'a Path>) {
        for staging in staged {
            if let Err(e) = fs::remove_file(staging) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %staging.display(), error = %e, "failed to remove staging file");
                }
            }
        }
    }
}
