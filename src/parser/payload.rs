//! Embedded page payload
//!
//! Movie pages inline a JSON document in `<script id="pageData">` carrying
//! the chart arrays and a few attributes that never reach the DOM. It is
//! located once per page and handed to every payload-backed extractor.

use scraper::Html;
use serde_json::{Map, Value};

use crate::parser::selectors::PAGE_DATA;

/// Decoded top-level payload object
pub type Payload = Map<String, Value>;

/// Locate and decode the embedded payload
///
/// Returns an empty map if the carrier node is missing, its text is not
/// valid JSON, or the JSON is not an object.
pub fn locate_payload(document: &Html) -> Payload {
    let Some(script) = document.select(&PAGE_DATA).next() else {
        return Payload::new();
    };

    let raw: String = script.text().collect();

    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::trace!("Page payload is not a JSON object");
            Payload::new()
        }
        Err(e) => {
            tracing::trace!(error = %e, "Page payload is not valid JSON");
            Payload::new()
        }
    }
}

/// Follow a chain of object keys, returning `None` on the first miss
pub fn lookup<'a>(payload: &'a Payload, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter()
        .try_fold(payload.get(*first)?, |value, key| value.get(*key))
}
