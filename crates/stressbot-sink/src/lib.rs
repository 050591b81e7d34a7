//! Append-only persistence for completed stressbot sessions.
//!
//! The controller never reads results back; the only contract is
//! "append one flat row per finished session".

mod csv_sink;
mod row;

pub use csv_sink::CsvSink;
pub use row::ResultRow;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Refusing to append an empty row")]
    EmptyRow,

    #[error("Existing header does not match row columns (expected [{expected}], got [{got}])")]
    HeaderMismatch { expected: String, got: String },
}

/// An append-only destination for finished session rows.
pub trait ResultSink {
    /// Append one row. Must not update or delete existing data.
    fn append(&self, row: &ResultRow) -> Result<(), SinkError>;

    /// Human-readable destination description for logs and error messages.
    fn describe(&self) -> String;
}
