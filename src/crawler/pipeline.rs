//! Sequential harvest driver
//!
//! Every discovered page goes through the same cycle on the calling thread:
//!
//! ```text
//! Pending ──fetch──▶ Fetched ──assemble──▶ Assembled ──persist──▶ Persisted
//!    │                  │                     │
//!    └──────────────────┴─────────────────────┴──────────────────▶ Failed
//! ```
//!
//! A failed page is logged and skipped. Nothing is retried and no failure
//! stops the batch.
//!
//! # Example
//!
//! ```no_run
//! use piaofang::crawler::{HttpFetcher, Harvester};
//! use piaofang::parser::MovieParser;
//! use piaofang::storage::JsonWriter;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let harvester = Harvester::new(
//!     HttpFetcher::new()?,
//!     MovieParser::new(),
//!     JsonWriter::new(Path::new("./output/movie_data"))?,
//! );
//!
//! let stats = harvester.run(&["https://piaofang.maoyan.com/movie/1250952".to_string()]);
//! println!("{stats}");
//! # Ok(())
//! # }
//! ```

use indicatif::{ProgressBar, ProgressStyle};

use crate::crawler::url::{page_id, parse_target};
use crate::crawler::Transport;
use crate::error::Error;
use crate::models::{HarvestStats, PageState};
use crate::parser::PageAssembler;
use crate::storage::RecordSink;
use crate::utils::error::HarvestError;
use crate::utils::{catch_quietly, truncate_text};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Drives fetch, assembly and persistence for a list of page addresses
pub struct Harvester<T, A, S> {
    transport: T,
    assembler: A,
    sink: S,
    show_progress: bool,
}

impl<T, A, S> Harvester<T, A, S>
where
    T: Transport,
    A: PageAssembler,
    S: RecordSink,
{
    /// Create a driver from its three collaborators
    pub fn new(transport: T, assembler: A, sink: S) -> Self {
        Self {
            transport,
            assembler,
            sink,
            show_progress: false,
        }
    }

    /// Show a terminal progress bar while running
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Harvest every address in order and report the outcome counts
    pub fn run(&self, addresses: &[String]) -> HarvestStats {
        let mut stats = HarvestStats::new(addresses.len());
        let progress = self.progress_bar(addresses.len());

        for address in addresses {
            progress.set_message(truncate_text(address, 60));
            let state = self.harvest_page(address);
            debug_assert!(state.is_terminal());
            stats.record(state);
            progress.inc(1);
        }

        progress.finish_and_clear();
        tracing::info!(
            discovered = stats.discovered,
            persisted = stats.persisted,
            failed = stats.failed,
            "Harvest complete"
        );

        stats
    }

    /// Run one page through its cycle, returning the terminal state
    pub fn harvest_page(&self, address: &str) -> PageState {
        match self.process(address) {
            Ok(()) => PageState::Persisted,
            Err(e) => {
                report_failure(address, e);
                PageState::Failed
            }
        }
    }

    fn process(&self, address: &str) -> Result<(), HarvestError> {
        let target = parse_target(address)?;
        trace_state(&target.movie_id, PageState::Pending);

        let html = self.transport.fetch_text(&target.url)?;
        trace_state(&target.movie_id, PageState::Fetched);

        let record = catch_quietly(|| self.assembler.assemble(&html))
            .map_err(HarvestError::AssemblyPanicked)?;
        trace_state(&target.movie_id, PageState::Assembled);

        self.sink
            .persist(&record, &target.movie_id)
            .map_err(|e| HarvestError::Persist(e.to_string()))?;
        trace_state(&target.movie_id, PageState::Persisted);

        Ok(())
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len as u64);
        match ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            Ok(style) => bar.set_style(style.progress_chars("#>-")),
            Err(e) => tracing::debug!(error = %e, "Invalid progress template, using default"),
        }
        bar
    }
}

fn trace_state(movie_id: &str, state: PageState) {
    tracing::trace!(movie_id, state = ?state, "Page state");
}

fn report_failure(address: &str, error: HarvestError) {
    let error = Error::from(error);
    let category = error.category();

    match &error {
        Error::Harvest(HarvestError::Fetch(e)) => {
            tracing::warn!(
                url = %address,
                status = ?e.status(),
                %category,
                error = %e,
                "Failed to fetch page"
            );
        }
        Error::Harvest(HarvestError::Parse(e)) => {
            tracing::warn!(url = %address, %category, error = %e, "Skipping page without identifier");
        }
        _ => {
            let movie_id = page_id(address).unwrap_or_default();
            tracing::error!(
                url = %address,
                movie_id = %movie_id,
                %category,
                error = %error,
                "Failed to process page"
            );
        }
    }
}
