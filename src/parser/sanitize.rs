//! Text normalization for values read out of the DOM
//!
//! Server-rendered labels carry indentation and line breaks between inline
//! nodes; every extractor reads text through these helpers so that a value
//! compares equal regardless of how the markup was laid out.

use scraper::ElementRef;

/// Group heading separators, ASCII and full-width
const HEADING_SEPARATORS: [char; 2] = [':', '：'];

/// Concatenate an element's text fragments, each trimmed, skipping empty ones
///
/// # Examples
///
/// ```
/// use piaofang::parser::sanitize::stripped_text;
/// use scraper::{Html, Selector};
///
/// let doc = Html::parse_fragment("<p>\n  上映时间 <span> 2024-02-10 </span>\n</p>");
/// let p = doc.select(&Selector::parse("p").unwrap()).next().unwrap();
/// assert_eq!(stripped_text(p), "上映时间2024-02-10");
/// ```
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Remove trailing heading separators and surrounding whitespace
///
/// # Examples
///
/// ```
/// use piaofang::parser::sanitize::strip_trailing_separator;
///
/// assert_eq!(strip_trailing_separator("出品方："), "出品方");
/// assert_eq!(strip_trailing_separator("Distributors: "), "Distributors");
/// ```
pub fn strip_trailing_separator(text: &str) -> &str {
    text.trim().trim_end_matches(HEADING_SEPARATORS).trim_end()
}

/// Trimmed text following the last occurrence of `marker`
///
/// Returns `None` when the marker does not occur.
///
/// # Examples
///
/// ```
/// use piaofang::parser::sanitize::text_after_marker;
///
/// assert_eq!(text_after_marker("IMDb 7.9", "IMDb"), Some("7.9"));
/// assert_eq!(text_after_marker("豆瓣 8.0", "IMDb"), None);
/// ```
pub fn text_after_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.rsplit_once(marker).map(|(_, rest)| rest.trim())
}
