//! HTTP client for the WEAO API
//!
//! Fetches a single endpoint and decodes its body as an opaque JSON document.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::endpoints::USER_AGENT;
use crate::error::RefreshError;

/// Client for fetching JSON documents from WEAO endpoints
///
/// Every request carries the `User-Agent` the API expects. No timeout is
/// configured beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct WeaoClient {
    http_client: Client,
}

impl WeaoClient {
    /// Creates a client that identifies itself as [`USER_AGENT`]
    pub fn new() -> Result<Self, RefreshError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(RefreshError::ClientSetup)?;

        Ok(Self { http_client })
    }

    /// Fetches `url` and parses the body as JSON
    ///
    /// # Returns
    /// * `Ok(Value)` - The decoded document
    /// * `Err(RefreshError::RequestFailed)` - Non-2xx status
    /// * `Err(RefreshError::NetworkError)` - The request or body read failed
    /// * `Err(RefreshError::DecodeError)` - The body is not valid JSON
    pub async fn fetch_json(&self, url: &str) -> Result<Value, RefreshError> {
        let network_error = |source| RefreshError::NetworkError {
            url: url.to_string(),
            source,
        };

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "received response");

        if !status.is_success() {
            // Best effort; an unreadable body is reported as empty
            let body = response.text().await.unwrap_or_default();
            return Err(RefreshError::RequestFailed {
                url: url.to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        let text = response.text().await.map_err(network_error)?;
        serde_json::from_str(&text).map_err(|source| RefreshError::DecodeError {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builds_client() {
        assert!(WeaoClient::new().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = WeaoClient::new().unwrap();

        // Port 9 on localhost (discard) is closed in test environments
        let result = client.fetch_json("http://127.0.0.1:9/api/versions/current").await;

        match result {
            Err(RefreshError::NetworkError { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:9/api/versions/current");
            }
            other => panic!("expected NetworkError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_is_network_error() {
        let client = WeaoClient::new().unwrap();

        let result = client.fetch_json("not a url").await;

        assert!(matches!(result, Err(RefreshError::NetworkError { .. })));
    }
}
