//! Page fetch error types

use std::time::Duration;

/// Errors that can occur while fetching a single page of records.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Non-success HTTP response from the server.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Network error while sending the request or reading the response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response payload was malformed.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// Failure reported by a non-HTTP page source.
    #[error("Source error: {0}")]
    Source(String),
}

impl FetchError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Creates a [`FetchError::Source`] error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body of a parse error, if captured.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Parse { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if re-triggering the same request might succeed.
    ///
    /// Nothing in this crate retries automatically; shells can use this to
    /// decide whether to offer a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}
