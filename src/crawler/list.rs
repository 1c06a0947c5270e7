//! Rankings page link collection
//!
//! The yearly rankings page lists one `ul.row` per movie. The row's
//! `data-com` attribute carries a small script fragment with the movie's
//! site-relative address, e.g. `href:'/movie/1250952'`.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;

use crate::config::Config;
use crate::crawler::url::join_path;
use crate::crawler::Transport;
use crate::parser::selectors::RANKING_ROW;
use crate::utils::error::FetchError;

lazy_static! {
    static ref MOVIE_HREF: Regex =
        Regex::new(r"href:'(/movie/\d+)'").expect("Invalid movie href pattern");
}

/// Marker a row's `data-com` must contain to be considered
const MOVIE_PATH_MARKER: &str = "/movie/";

/// Collects movie page addresses from the rankings page
#[derive(Debug, Clone)]
pub struct RankingsCollector {
    base_url: String,
    rankings_url: String,
}

impl RankingsCollector {
    /// Create a collector for a site root and its rankings address
    pub fn new(base_url: impl Into<String>, rankings_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            rankings_url: rankings_url.into(),
        }
    }

    /// Create a collector from the crawler section of the configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.crawler.base_url.clone(), config.rankings_url())
    }

    /// Address of the rankings page
    pub fn rankings_url(&self) -> &str {
        &self.rankings_url
    }

    /// Extract movie page addresses from rankings markup
    ///
    /// Addresses are returned in document order; repeated rows yield
    /// repeated addresses.
    pub fn collect(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        document
            .select(&RANKING_ROW)
            .filter_map(|row| row.value().attr("data-com"))
            .filter(|data| data.contains(MOVIE_PATH_MARKER))
            .filter_map(|data| MOVIE_HREF.captures(data))
            .filter_map(|caps| caps.get(1))
            .map(|path| join_path(&self.base_url, path.as_str()))
            .collect()
    }

    /// Fetch the rankings page and collect its movie addresses
    ///
    /// # Errors
    ///
    /// Returns the transport error, including non-success statuses. A run
    /// cannot proceed without its target list.
    pub fn fetch_targets<T: Transport>(&self, transport: &T) -> Result<Vec<String>, FetchError> {
        tracing::info!(url = %self.rankings_url, "Fetching rankings page");

        let html = transport.fetch_text(&self.rankings_url)?;
        let targets = self.collect(&html);

        tracing::info!(count = targets.len(), "Discovered movie pages");
        Ok(targets)
    }
}
