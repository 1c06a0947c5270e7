//! Error types for the piaofang harvester
//!
//! This module defines the domain-specific error types used throughout the application.

use thiserror::Error;

/// Errors that can occur while fetching a page
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response status
    #[error("Request failed with status: {0}")]
    Status(u16),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Status code carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }
}

/// Errors that can occur while interpreting page addresses or markup
#[derive(Error, Debug)]
pub enum ParseError {
    /// The page address has no trailing identifier segment
    #[error("No page identifier in URL: {0}")]
    MissingPageId(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Per-page harvest failures
///
/// Every variant aborts one page only; the batch continues.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Fetch failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Address could not be turned into a persistence key
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Record assembly panicked
    #[error("Assembly failed: {0}")]
    AssemblyPanicked(String),

    /// Record could not be written
    #[error("Persist failed: {0}")]
    Persist(String),
}
