//! Error types for a cache refresh run

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a refresh run
///
/// The first error encountered anywhere in the pipeline is returned as-is;
/// nothing is retried.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The request could not be completed (DNS, connection, transport timeout)
    #[error("Network error while requesting {url}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-2xx status
    #[error("Request failed {status} {status_text}: {}", display_body(.body))]
    RequestFailed {
        url: String,
        status: u16,
        status_text: String,
        /// Response body, or an empty string if it could not be read
        body: String,
    },

    /// The response body was not valid JSON
    #[error("Failed to decode JSON from {url}")]
    DecodeError {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A cache envelope could not be serialized
    #[error("Failed to encode {}", .path.display())]
    EncodeError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client")]
    ClientSetup(#[source] reqwest::Error),

    /// Creating the destination directory or writing a cache file failed
    #[error("Filesystem error at {}", .path.display())]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RefreshError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RefreshError::FilesystemError {
            path: path.into(),
            source,
        }
    }
}

/// Formats an error followed by its chain of causes, separated by `: `
pub fn describe(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn display_body(body: &str) -> &str {
    if body.is_empty() {
        "no body"
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message_includes_status_and_body() {
        let err = RefreshError::RequestFailed {
            url: "https://weao.xyz/api/versions/current".to_string(),
            status: 503,
            status_text: "Service Unavailable".to_string(),
            body: "maintenance".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Request failed 503 Service Unavailable: maintenance"
        );
    }

    #[test]
    fn test_request_failed_message_with_empty_body() {
        let err = RefreshError::RequestFailed {
            url: "https://weao.xyz/api/status/exploits".to_string(),
            status: 404,
            status_text: "Not Found".to_string(),
            body: String::new(),
        };

        assert_eq!(err.to_string(), "Request failed 404 Not Found: no body");
    }

    #[test]
    fn test_decode_error_names_url() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = RefreshError::DecodeError {
            url: "https://weao.xyz/api/versions/past".to_string(),
            source,
        };

        let message = err.to_string();
        assert!(message.contains("https://weao.xyz/api/versions/past"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_filesystem_error_names_path() {
        let err = RefreshError::filesystem(
            "/tmp/.well-known/weao",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        assert_eq!(err.to_string(), "Filesystem error at /tmp/.well-known/weao");
        assert_eq!(
            describe(&err),
            "Filesystem error at /tmp/.well-known/weao: denied"
        );
    }

    #[test]
    fn test_describe_lists_each_cause_once() {
        let err = RefreshError::filesystem(
            "/srv/site/.well-known/weao",
            std::io::Error::new(std::io::ErrorKind::Other, "Not a directory"),
        );

        let message = describe(&err);

        assert_eq!(message.matches("Not a directory").count(), 1);
    }

    #[test]
    fn test_describe_without_source_is_display() {
        let err = RefreshError::RequestFailed {
            url: "https://weao.xyz/api/versions/future".to_string(),
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: String::new(),
        };

        assert_eq!(describe(&err), "Request failed 502 Bad Gateway: no body");
    }

    #[test]
    fn test_encode_error_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("]").unwrap_err();
        let err = RefreshError::EncodeError {
            path: PathBuf::from("/srv/site/.well-known/weao/versions.json"),
            source,
        };

        assert!(describe(&err)
            .starts_with("Failed to encode /srv/site/.well-known/weao/versions.json: "));
    }

    #[tokio::test]
    async fn test_client_setup_message_has_no_url() {
        // An unparseable URL yields a reqwest::Error without touching the network
        let source = reqwest::Client::new()
            .get("not a url")
            .send()
            .await
            .unwrap_err();
        let err = RefreshError::ClientSetup(source);

        assert_eq!(err.to_string(), "Failed to build HTTP client");
        assert!(!err.to_string().contains("requesting"));
    }
}
