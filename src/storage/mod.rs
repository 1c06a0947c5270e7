//! Record persistence
//!
//! This module defines the sink the harvest driver hands assembled records
//! to, and the JSON file implementation used by the binary.

pub mod json;

pub use json::JsonWriter;

use crate::error::Result;
use crate::models::MovieRecord;

/// Destination for assembled records
pub trait RecordSink {
    /// Store one record under its page identifier
    fn persist(&self, record: &MovieRecord, key: &str) -> Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for &S {
    fn persist(&self, record: &MovieRecord, key: &str) -> Result<()> {
        (**self).persist(record, key)
    }
}
