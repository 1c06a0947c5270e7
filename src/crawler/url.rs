//! Page addresses and persistence keys
//!
//! A movie page address ends in the site's numeric movie identifier, e.g.
//! `https://piaofang.maoyan.com/movie/1250952`. That trailing segment names
//! the output document.

use url::Url;

use crate::models::PageTarget;
use crate::utils::error::ParseError;

/// Extract the page identifier, the last non-empty path segment
///
/// # Errors
///
/// Returns `ParseError::InvalidUrl` if the address does not parse and
/// `ParseError::MissingPageId` if its path has no segment.
///
/// # Examples
///
/// ```
/// use piaofang::crawler::url::page_id;
///
/// assert_eq!(page_id("https://piaofang.maoyan.com/movie/1250952").unwrap(), "1250952");
/// assert!(page_id("https://piaofang.maoyan.com/").is_err());
/// ```
pub fn page_id(address: &str) -> Result<String, ParseError> {
    let url = Url::parse(address).map_err(|e| ParseError::InvalidUrl(format!("{address}: {e}")))?;

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| ParseError::MissingPageId(address.to_string()))
}

/// Resolve an address into a harvest target
///
/// # Errors
///
/// Fails as [`page_id`] does.
pub fn parse_target(address: &str) -> Result<PageTarget, ParseError> {
    Ok(PageTarget {
        url: address.to_string(),
        movie_id: page_id(address)?,
    })
}

/// Join a site-relative path onto the base address
///
/// # Examples
///
/// ```
/// use piaofang::crawler::url::join_path;
///
/// assert_eq!(
///     join_path("https://piaofang.maoyan.com/", "/movie/1"),
///     "https://piaofang.maoyan.com/movie/1"
/// );
/// ```
pub fn join_path(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id() {
        assert_eq!(
            page_id("https://piaofang.maoyan.com/movie/1250952").unwrap(),
            "1250952"
        );
    }

    #[test]
    fn test_page_id_trailing_slash_and_query() {
        assert_eq!(
            page_id("https://piaofang.maoyan.com/movie/341516/").unwrap(),
            "341516"
        );
        assert_eq!(
            page_id("https://piaofang.maoyan.com/movie/42?tab=box").unwrap(),
            "42"
        );
    }

    #[test]
    fn test_page_id_missing() {
        let err = page_id("https://piaofang.maoyan.com").unwrap_err();
        assert!(matches!(err, ParseError::MissingPageId(_)));

        let err = page_id("https://piaofang.maoyan.com//").unwrap_err();
        assert!(matches!(err, ParseError::MissingPageId(_)));
    }

    #[test]
    fn test_page_id_invalid_url() {
        let err = page_id("/movie/123").unwrap_err();
        assert!(matches!(err, ParseError::InvalidUrl(_)));
    }

    #[test]
    fn test_parse_target() {
        let target = parse_target("https://piaofang.maoyan.com/movie/7").unwrap();
        assert_eq!(target.url, "https://piaofang.maoyan.com/movie/7");
        assert_eq!(target.movie_id, "7");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("http://a", "/movie/1"), "http://a/movie/1");
        assert_eq!(join_path("http://a/", "movie/1"), "http://a/movie/1");
    }
}
