//! HTML parsing and record assembly
//!
//! This module turns the raw markup of one movie detail page into a
//! [`MovieRecord`]. DOM-backed facets live in [`html`], payload-backed
//! facets in [`series`], and the embedded payload itself in [`payload`].

pub mod html;
pub mod payload;
pub mod sanitize;
pub mod selectors;
pub mod series;

pub use payload::{locate_payload, Payload};

use scraper::Html;

use crate::models::MovieRecord;
use crate::utils::catch_quietly;

/// Label under which the payload movie name is stored in basic info
pub const MOVIE_NAME_LABEL: &str = "电影名称";

/// Turns page markup into a record
///
/// The harvest driver is generic over this trait so that batches can be
/// driven with substitute assemblers.
pub trait PageAssembler {
    /// Assemble one record; never fails, missing facets stay empty
    fn assemble(&self, markup: &str) -> MovieRecord;
}

/// Assembler for movie detail pages
#[derive(Debug, Clone, Copy, Default)]
pub struct MovieParser;

impl MovieParser {
    /// Create a new parser instance
    pub fn new() -> Self {
        Self
    }

    /// Parse the document once, locate the payload once, then extract every facet
    pub fn assemble(&self, markup: &str) -> MovieRecord {
        let document = Html::parse_document(markup);
        let payload = locate_payload(&document);

        let title = guarded("title", || html::extract_title(&document));

        let mut basic_info = guarded("basic_info", || html::extract_basic_info(&document));
        if let Some(name) = series::extract_movie_name(&payload) {
            html::insert_last_wins(&mut basic_info, MOVIE_NAME_LABEL.to_string(), name);
        }

        MovieRecord {
            title,
            basic_info,
            rating_info: guarded("rating_info", || html::extract_rating(&document)),
            box_office_series: guarded("box_office_series", || {
                series::extract_box_office(&payload)
            }),
            schedule_series: guarded("schedule_series", || series::extract_schedule(&payload)),
            pre_release_wish_series: guarded("pre_release_wish_series", || {
                series::extract_wish_series(&payload)
            }),
            persona_data: guarded("persona_data", || html::extract_persona(&document)),
            cast_info: guarded("cast_info", || html::extract_cast(&document)),
            companies: guarded("companies", || html::extract_companies(&document)),
            technical_specs: guarded("technical_specs", || {
                html::extract_technical_specs(&document)
            }),
            marketing_events: guarded("marketing_events", || {
                html::extract_marketing_events(&document)
            }),
        }
    }
}

impl PageAssembler for MovieParser {
    fn assemble(&self, markup: &str) -> MovieRecord {
        MovieParser::assemble(self, markup)
    }
}

/// Run one facet extractor, substituting the facet default if it panics
fn guarded<T: Default>(facet: &'static str, extract: impl FnOnce() -> T) -> T {
    match catch_quietly(extract) {
        Ok(value) => value,
        Err(detail) => {
            tracing::debug!(facet, %detail, "Facet extraction failed, using empty value");
            T::default()
        }
    }
}
