//! Page fetching and harvest orchestration
//!
//! This module holds the transport seam, the rankings link collector and the
//! harvest driver that walks every discovered movie page.

pub mod fetcher;
pub mod headers;
pub mod list;
pub mod pipeline;
pub mod url;

pub use fetcher::HttpFetcher;
pub use list::RankingsCollector;
pub use pipeline::Harvester;

use crate::utils::error::FetchError;

/// Raw response of one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Decoded response body
    pub body: String,
}

impl FetchResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of page markup
///
/// Implemented over HTTP by [`HttpFetcher`]; tests substitute in-memory
/// transports.
pub trait Transport {
    /// Issue one request; non-success statuses are returned, not raised
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;

    /// Fetch a page body, treating any non-2xx status as a failure
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.fetch(url)?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }
        Ok(response.body)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        (**self).fetch(url)
    }
}
