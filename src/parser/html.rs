//! DOM-backed extractors for movie detail pages
//!
//! Each function reads one facet from the parsed document and returns the
//! facet's empty value when the fragment is missing. None of them fail.

use scraper::{ElementRef, Html, Selector};
use indexmap::IndexMap;

use crate::models::{CastInfo, CompanyMap, LabelMap, MarketingEvent, RatingInfo, Role};
use crate::parser::sanitize::{strip_trailing_separator, stripped_text, text_after_marker};
use crate::parser::selectors::{
    CAST_IMAGE, CAST_STRIP, COMPANY_GROUP, COMPANY_HEADING, COMPANY_HEADING_FALLBACK, IMAGE,
    INFO_DETAIL_COL, INFO_DETAIL_CONTENT, INFO_DETAIL_TITLE, OTHER_SCORE, PERSONA_ITEM,
    PERSONA_KEY, PERSONA_SECTION, PERSONA_VALUE, RATING_NUM, SCORE_BLOCK, SCORE_COUNT,
    TECHNICAL_ROW, TITLE, TRACE_DATE, TRACE_ITEM, TRACE_NAME, TRACE_TAG, WISH_COUNT,
};

/// Marker preceding the external score in the rating block
pub const IMDB_MARKER: &str = "IMDb";

/// Insert a pair, replacing any earlier value for the same key
///
/// Labels are site-defined and occasionally repeat; the last occurrence in
/// document order is kept, at the position where the label first appeared.
pub fn insert_last_wins<V>(map: &mut IndexMap<String, V>, key: String, value: V) {
    if map.contains_key(&key) {
        tracing::trace!(key = %key, "Duplicate label, keeping last value");
    }
    map.insert(key, value);
}

/// Movie title from `h1.nav-header`
pub fn extract_title(document: &Html) -> String {
    first_text(document.root_element(), &TITLE).unwrap_or_default()
}

/// Label/value pairs from the `info-detail-col` blocks
pub fn extract_basic_info(document: &Html) -> LabelMap {
    collect_label_values(document.select(&INFO_DETAIL_COL))
}

/// Label/value pairs from the technical section rows
pub fn extract_technical_specs(document: &Html) -> LabelMap {
    collect_label_values(document.select(&TECHNICAL_ROW))
}

/// Scores from the first scoring block
pub fn extract_rating(document: &Html) -> RatingInfo {
    let Some(block) = document.select(&SCORE_BLOCK).next() else {
        return RatingInfo::default();
    };

    RatingInfo {
        rating: first_text(block, &RATING_NUM),
        rating_count: first_text(block, &SCORE_COUNT),
        wish_count: first_text(block, &WISH_COUNT),
        imdb_score: first_text(block, &OTHER_SCORE)
            .and_then(|text| text_after_marker(&text, IMDB_MARKER).map(str::to_string)),
    }
}

/// Audience persona pairs from both block layouts of the persona section
pub fn extract_persona(document: &Html) -> LabelMap {
    let mut persona = LabelMap::new();

    let Some(section) = document.select(&PERSONA_SECTION).next() else {
        return persona;
    };

    for item in section.select(&PERSONA_ITEM) {
        let key = first_text(item, &PERSONA_KEY);
        let value = first_text(item, &PERSONA_VALUE);
        if let (Some(key), Some(value)) = (key, value) {
            insert_last_wins(&mut persona, key, value);
        }
    }

    persona
}

/// Cast and crew names grouped by role
///
/// Only pages showing the cast card strip are scanned. Each person image is
/// classified by the nearest `span` preceding its enclosing `div`.
pub fn extract_cast(document: &Html) -> CastInfo {
    let mut cast = CastInfo::default();

    if document.select(&CAST_STRIP).next().is_none() {
        return cast;
    }

    for img in document.select(&CAST_IMAGE) {
        let label = role_label(img).unwrap_or_default();
        let name = img.value().attr("alt").unwrap_or_default().to_string();
        cast.push(Role::classify(&label), name);
    }

    cast
}

/// Production and distribution groups with their member names
pub fn extract_companies(document: &Html) -> CompanyMap {
    let mut companies = CompanyMap::new();

    for group in document.select(&COMPANY_GROUP) {
        let heading = group
            .select(&COMPANY_HEADING)
            .next()
            .or_else(|| group.select(&COMPANY_HEADING_FALLBACK).next());

        let Some(heading) = heading else {
            continue;
        };

        let title = strip_trailing_separator(&stripped_text(heading)).to_string();
        let members: Vec<String> = group
            .select(&IMAGE)
            .filter_map(|img| img.value().attr("alt"))
            .filter(|alt| !alt.is_empty())
            .map(str::to_string)
            .collect();

        insert_last_wins(&mut companies, title, members);
    }

    companies
}

/// Marketing timeline entries; items missing a date or a title are dropped
pub fn extract_marketing_events(document: &Html) -> Vec<MarketingEvent> {
    document
        .select(&TRACE_ITEM)
        .filter_map(|item| {
            let time = first_text(item, &TRACE_DATE)?;
            let event = first_text(item, &TRACE_NAME)?;
            let tag = first_text(item, &TRACE_TAG).unwrap_or_default();
            Some(MarketingEvent { time, event, tag })
        })
        .collect()
}

/// Text of the first descendant matching `selector`
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(stripped_text)
}

fn collect_label_values<'a>(blocks: impl Iterator<Item = ElementRef<'a>>) -> LabelMap {
    let mut map = LabelMap::new();
    for block in blocks {
        let key = first_text(block, &INFO_DETAIL_TITLE);
        let value = first_text(block, &INFO_DETAIL_CONTENT);
        if let (Some(key), Some(value)) = (key, value) {
            insert_last_wins(&mut map, key, value);
        }
    }
    map
}

/// Nearest `span` sibling preceding the image's closest enclosing `div`
fn role_label(img: ElementRef<'_>) -> Option<String> {
    let container = img
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "div")?;

    container
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span")
        .map(stripped_text)
}
