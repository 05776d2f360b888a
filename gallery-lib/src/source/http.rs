//! HTTP page source for paginated REST collections.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

use super::PageDataSource;
use super::SourceConfig;
use crate::error::ConfigError;
use crate::error::FetchError;
use crate::model::Page;
use crate::model::Record;

/// Fetches pages with `GET {base_url}/{resource}?page={n}`.
///
/// Expects the body `{ "data": [...], "pagination": { "limit": n, "total": n } }`.
///
/// # Example
///
/// ```ignore
/// use gallery_lib::source::{HttpPageSource, PageDataSource, SourceConfig};
///
/// let source = HttpPageSource::new(SourceConfig::default())?;
/// let page = source.fetch_page(1).await?;
///
/// for record in page.records() {
///     println!("{}", record.title_or_placeholder());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    http_client: Client,
    resource_url: Url,
    page_param: String,
    fields: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl HttpPageSource {
    /// Creates a source with its own HTTP client.
    pub fn new(config: SourceConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Self::with_client(config, http_client)
    }

    /// Creates a source that shares an existing HTTP client.
    pub fn with_client(config: SourceConfig, http_client: Client) -> Result<Self, ConfigError> {
        let resource_url = config.resource_url()?;
        let fields = (!config.fields.is_empty()).then(|| config.fields.join(","));

        Ok(Self {
            http_client,
            resource_url,
            page_param: config.page_param,
            fields,
            timeout: config.timeout,
            connect_timeout: config.connect_timeout,
        })
    }

    /// Returns the URL requested for the given 1-based page number.
    pub fn page_url(&self, page_number: usize) -> Url {
        let mut url = self.resource_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(&self.page_param, &page_number.to_string());
            if let Some(fields) = &self.fields {
                query.append_pair("fields", fields);
            }
        }
        url
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            let after = self
                .timeout
                .or(self.connect_timeout)
                .unwrap_or_default();
            FetchError::Timeout(after)
        } else {
            FetchError::Network(e)
        }
    }
}

#[async_trait]
impl PageDataSource for HttpPageSource {
    async fn fetch_page(&self, page_number: usize) -> Result<Page, FetchError> {
        if page_number == 0 {
            return Err(FetchError::InvalidUrl(
                "page numbers start at 1".to_string(),
            ));
        }

        let url = self.page_url(page_number);
        debug!("GET {}", url);

        let mut request = self
            .http_client
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            debug!("GET {} returned HTTP {}", url, status.as_u16());
            return Err(FetchError::http(status.as_u16(), body));
        }

        parse_page(&body)
    }
}

/// Collection response body.
#[derive(Debug, Deserialize)]
struct CollectionResponse {
    data: Vec<Record>,
    pagination: PaginationInfo,
}

/// The `pagination` block; extra keys such as `offset` or `next_url` are ignored.
#[derive(Debug, Deserialize)]
struct PaginationInfo {
    limit: usize,
    total: usize,
}

/// Parses a collection response body into a [`Page`].
pub(crate) fn parse_page(body: &str) -> Result<Page, FetchError> {
    let response: CollectionResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::parse_with_body(e.to_string(), body))?;

    Ok(Page::new(
        response.data,
        response.pagination.limit,
        response.pagination.total,
    ))
}
