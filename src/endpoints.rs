//! The fixed set of WEAO API endpoints mirrored into the cache

/// Client identifier sent on every request; the WEAO API rejects unknown clients
pub const USER_AGENT: &str = "WEAO-3PService";

/// Base URL for the WEAO API
const WEAO_BASE_URL: &str = "https://weao.xyz";

/// Version endpoints in fetch order, as (logical name, path)
const VERSION_PATHS: [(&str, &str); 3] = [
    ("current", "/api/versions/current"),
    ("future", "/api/versions/future"),
    ("past", "/api/versions/past"),
];

/// Executor status endpoint path
const EXECUTORS_PATH: &str = "/api/status/exploits";

/// A version endpoint and the key its document is stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEndpoint {
    /// Key in the `data` mapping of `versions.json`
    pub name: &'static str,
    pub url: String,
}

/// The endpoints fetched during one refresh run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Version endpoints, in the order they are fetched
    pub versions: Vec<VersionEndpoint>,
    /// Executor status endpoint
    pub executors: String,
}

impl Endpoints {
    /// The production WEAO endpoints
    pub fn weao() -> Self {
        Self::with_base_url(WEAO_BASE_URL)
    }

    /// Same path layout rooted at another host (for testing)
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            versions: VERSION_PATHS
                .iter()
                .map(|(name, path)| VersionEndpoint {
                    name,
                    url: format!("{}{}", base, path),
                })
                .collect(),
            executors: format!("{}{}", base, EXECUTORS_PATH),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::weao()
    }
}
