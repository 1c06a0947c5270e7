//! Blocking HTTP transport
//!
//! Pages are fetched one at a time on the calling thread. The client sends a
//! desktop-browser user agent with browser-like headers and transparently
//! decompresses gzip bodies. There is no retry; a failed request fails the
//! page it was made for.

use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

use crate::config::{Config, DEFAULT_USER_AGENT};
use crate::crawler::headers::build_browser_headers;
use crate::crawler::{FetchResponse, Transport};
use crate::utils::error::FetchError;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport backed by a blocking `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default user agent and timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom user agent and timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created,
    /// including when the user agent is not a valid header value
    pub fn with_config(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(build_browser_headers())
            .timeout(timeout)
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    /// Create a fetcher from the crawler section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::with_config(&config.crawler.user_agent, config.request_timeout())
    }
}

impl Transport for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        tracing::debug!(url = %parsed, "Fetching page");

        let response = self.client.get(parsed).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        tracing::trace!(url = %url, status, bytes = body.len(), "Fetched page");

        Ok(FetchResponse { status, body })
    }
}
