//! Data handling for the table viewer: file sources, paging and search

pub mod cache;
pub mod config;
pub mod reader;
pub mod search;
pub mod session;
pub mod sources;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use cache::ChunkCache;
pub use config::ReaderConfig;
pub use reader::PaginatedReader;
pub use search::{search, SearchMatch, SearchOutcome, SearchResults};
pub use session::Session;
pub use sources::{CsvBatchStream, CsvSource, DataSource, SheetCollection, SourceKind};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Excel error: {0}")]
    Excel(#[from] calamine::XlsxError),

    #[error("File has no columns")]
    NoColumns,

    #[error("Unknown sheet: {0}")]
    UnknownSheet(String),

    #[error("Reading stopped after an earlier error: {0}")]
    Halted(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}
