//! JSON document storage
//!
//! Each record is written to its own pretty-printed file named after the
//! page identifier. Non-ASCII text is written as-is.
//!
//! Documents are staged in a temporary file beside the target and renamed
//! into place, so a reader only ever sees a complete document.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::models::MovieRecord;
use crate::storage::RecordSink;
use crate::utils::sanitize_filename;

/// File name prefix of every persisted document
pub const FILE_PREFIX: &str = "movie_data_";

/// Writes one JSON document per record under an output root
#[derive(Debug, Clone)]
pub struct JsonWriter {
    /// Output directory
    output_dir: PathBuf,
}

impl JsonWriter {
    /// Create a writer rooted at `output_dir`, creating it if needed
    ///
    /// # Example
    /// ```no_run
    /// use piaofang::storage::JsonWriter;
    /// use std::path::Path;
    ///
    /// let writer = JsonWriter::new(Path::new("./output/movie_data")).unwrap();
    /// ```
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File path for a record key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.output_dir
            .join(format!("{FILE_PREFIX}{}.json", sanitize_filename(key)))
    }

    /// Write a record, replacing any existing document for the same key
    ///
    /// # Returns
    /// Path to saved file
    pub fn save(&self, record: &MovieRecord, key: &str) -> Result<PathBuf> {
        let path = self.path_for(key);

        self.write_atomic(&path, |writer| {
            serde_json::to_writer_pretty(writer, record)?;
            Ok(())
        })?;

        tracing::debug!(path = %path.display(), "Saved record");
        Ok(path)
    }

    /// Stage `write`'s output in `output_dir`, then rename it over `path`
    ///
    /// On any error the staged file is removed and `path` is untouched.
    fn write_atomic(
        &self,
        path: &Path,
        write: impl FnOnce(&mut dyn Write) -> Result<()>,
    ) -> Result<()> {
        let mut staged = NamedTempFile::new_in(&self.output_dir)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            write(&mut writer)?;
            writer.flush()?;
        }
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl RecordSink for JsonWriter {
    fn persist(&self, record: &MovieRecord, key: &str) -> Result<()> {
        self.save(record, key).map(|_| ())
    }
}
