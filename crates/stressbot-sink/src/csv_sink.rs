use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ResultRow, ResultSink, SinkError};

/// CSV-backed result sink.
///
/// The first append creates the file and writes a header row; later appends
/// add one data row each. The header of an existing file must match the
/// incoming row's columns exactly, otherwise the append is refused so rows
/// from different study configurations cannot interleave silently.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn existing_headers(&self) -> Result<Option<Vec<String>>, SinkError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?.iter().map(String::from).collect();
        Ok(Some(headers))
    }
}

impl ResultSink for CsvSink {
    fn append(&self, row: &ResultRow) -> Result<(), SinkError> {
        if row.is_empty() {
            return Err(SinkError::EmptyRow);
        }

        match self.existing_headers()? {
            Some(existing) => {
                if existing != row.headers() {
                    return Err(SinkError::HeaderMismatch {
                        expected: existing.join(","),
                        got: row.headers().join(","),
                    });
                }

                let file = OpenOptions::new().append(true).open(&self.path)?;
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(file);
                writer.write_record(row.values())?;
                writer.flush()?;
            }
            None => {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }

                let mut writer = csv::Writer::from_path(&self.path)?;
                writer.write_record(row.headers())?;
                writer.write_record(row.values())?;
                writer.flush()?;
            }
        }

        debug!(path = %self.path.display(), columns = row.len(), "Appended result row");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
