//! Page source configuration

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Configuration for [`HttpPageSource`](super::HttpPageSource).
///
/// Defaults point at the public artworks collection API.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gallery_lib::source::SourceConfig;
///
/// let config = SourceConfig::default()
///     .with_base_url("https://api.example.org/v1")
///     .with_resource("paintings")
///     .with_timeout(Duration::from_secs(10));
///
/// let url = config.resource_url().unwrap();
/// assert_eq!(url.as_str(), "https://api.example.org/v1/paintings");
/// ```
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Root of the REST API.
    ///
    /// Default: `https://api.artic.edu/api/v1`
    pub base_url: String,

    /// Collection path appended to the base URL.
    ///
    /// Default: `artworks`
    pub resource: String,

    /// Name of the 1-based page number query parameter.
    ///
    /// Default: `page`
    pub page_param: String,

    /// Field projection sent as `fields=a,b,c`. Empty sends no projection.
    pub fields: Vec<String>,

    /// Per-request timeout.
    pub timeout: Option<Duration>,

    /// Connection timeout for the underlying HTTP client.
    pub connect_timeout: Option<Duration>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.artic.edu/api/v1".to_string(),
            resource: "artworks".to_string(),
            page_param: "page".to_string(),
            fields: Vec::new(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl SourceConfig {
    /// Creates a new source config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the resource path.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Sets the page query parameter name.
    pub fn with_page_param(mut self, page_param: impl Into<String>) -> Self {
        self.page_param = page_param.into();
        self
    }

    /// Sets the field projection.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Builds the collection URL (`{base_url}/{resource}`) without a query.
    pub fn resource_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid_base_url(&self.base_url, e))?;

        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| ConfigError::CannotBeABase(self.base_url.clone()))?
            .pop_if_empty()
            .extend(self.resource.split('/').filter(|s| !s.is_empty()));

        Ok(url)
    }
}
