//! piaofang - Box office harvester
//!
//! Collects movie pages from the yearly rankings of a box-office analytics
//! site and turns each page into a structured record with eleven facets:
//! title, basic info, rating, box office, screenings, pre-release wish
//! counts, audience persona, cast and crew, companies, technical specs and
//! the marketing timeline.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Page transport, rankings link collection and the harvest driver
//! - [`parser`] - Payload location, facet extraction and record assembly
//! - [`models`] - Core data structures and types
//! - [`storage`] - Record persistence as JSON documents
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use piaofang::config::Config;
//! use piaofang::crawler::{Harvester, HttpFetcher, RankingsCollector};
//! use piaofang::parser::MovieParser;
//! use piaofang::storage::JsonWriter;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let fetcher = HttpFetcher::from_config(&config)?;
//!     let targets = RankingsCollector::from_config(&config).fetch_targets(&fetcher)?;
//!
//!     let writer = JsonWriter::new(&config.storage.output_dir)?;
//!     let stats = Harvester::new(&fetcher, MovieParser::new(), writer).run(&targets);
//!     println!("{stats}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{FetchResponse, Harvester, HttpFetcher, RankingsCollector, Transport};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{HarvestStats, MovieRecord, PageState, PageTarget, Role};
    pub use crate::parser::{MovieParser, PageAssembler};
    pub use crate::storage::{JsonWriter, RecordSink};
}

// Direct re-exports for convenience
pub use models::{HarvestStats, MovieRecord};
