//! Unified error handling for the piaofang crate
//!
//! Domain-specific errors live in [`crate::utils::error`]; this module wraps
//! them into a single `Error` enum so callers crossing module boundaries have
//! one type to match on.
//!
//! - [`ErrorCategory`] - Classification of errors, logged as a structured field
//! - [`Error`] - Unified error enum wrapping all domain-specific errors

use std::io;
use thiserror::Error;

pub use crate::utils::error::{FetchError, HarvestError, ParseError};

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, status)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Storage and I/O errors
    Storage,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the piaofang crate
#[derive(Error, Debug)]
pub enum Error {
    /// Per-page harvest errors
    #[error("Harvest error: {0}")]
    Harvest(#[from] HarvestError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Harvest(e) => match e {
                HarvestError::Fetch(_) => ErrorCategory::Network,
                HarvestError::Parse(_) | HarvestError::AssemblyPanicked(_) => {
                    ErrorCategory::Parsing
                }
                HarvestError::Persist(_) => ErrorCategory::Storage,
            },
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Parsing,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
