//! Configuration error types

/// Errors raised while turning configuration into a working page source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("Base URL '{0}' cannot be used as a resource root")]
    CannotBeABase(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ConfigError {
    /// Creates a new invalid base URL error.
    pub fn invalid_base_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
