//! Error types for curlfetch

use std::path::PathBuf;
use thiserror::Error;

/// Number of response characters kept for diagnostics on a failed request
pub const RESPONSE_EXCERPT_CHARS: usize = 500;

/// Main error type for curlfetch
///
/// Undecodable request bodies and non-JSON responses are not errors: they are
/// represented by `RequestBody::Raw` and `ResultPayload::Fallback`.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Malformed curl command: {0}")]
    MalformedCommand(String),

    #[error("Request failed: {message}")]
    RequestFailure {
        message: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Response text, when a response was received
        body: Option<String>,
    },

    #[error("Failed to write {}: {source}", path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Failure without any response (DNS, connect, timeout, client setup)
    pub fn request(message: impl Into<String>) -> Self {
        FetchError::RequestFailure {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Status code of the failed response, if one arrived
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::RequestFailure { status, .. } => *status,
            _ => None,
        }
    }

    /// First 500 characters of the response body attached to a request failure
    pub fn response_excerpt(&self) -> Option<String> {
        match self {
            FetchError::RequestFailure { body: Some(body), .. } => {
                Some(body.chars().take(RESPONSE_EXCERPT_CHARS).collect())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let message = if err.is_timeout() {
            format!("timed out: {}", err)
        } else if err.is_connect() {
            format!("connection error: {}", err)
        } else {
            err.to_string()
        };
        FetchError::RequestFailure {
            message,
            status,
            body: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_excerpt_truncates_on_chars() {
        let err = FetchError::RequestFailure {
            message: "HTTP 500".to_string(),
            status: Some(500),
            body: Some("é".repeat(600)),
        };
        let excerpt = err.response_excerpt().unwrap();
        assert_eq!(excerpt.chars().count(), RESPONSE_EXCERPT_CHARS);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_no_excerpt_without_body() {
        let err = FetchError::request("dns error");
        assert!(err.response_excerpt().is_none());
        assert!(err.status().is_none());

        let err = FetchError::MalformedCommand("no URL".to_string());
        assert!(err.response_excerpt().is_none());
    }

    #[test]
    fn test_persistence_failure_display() {
        let err = FetchError::PersistenceFailure {
            path: PathBuf::from("/nope/out.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/nope/out.json"));
    }
}
