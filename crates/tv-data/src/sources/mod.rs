//! Tabular file sources

pub mod csv_source;
pub mod excel_source;

use std::path::Path;
use std::sync::Arc;

pub use csv_source::{CsvBatchStream, CsvSource};
pub use excel_source::SheetCollection;

use crate::config::ReaderConfig;
use crate::DataError;

/// File kind, decided by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Streamed delimited text
    Csv,
    /// `.xlsx` workbook loaded as a sheet collection
    Excel,
}

impl SourceKind {
    /// `.xlsx` (any case) is a workbook, everything else is read as CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => SourceKind::Excel,
            _ => SourceKind::Csv,
        }
    }
}

/// An opened tabular file
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Forward-only batches, re-readable from the file
    Streamed(CsvSource),
    /// Workbook held in memory
    Sheets(Arc<SheetCollection>),
}

impl DataSource {
    /// Open a file, choosing the source kind from its extension
    pub fn open(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self, DataError> {
        let path = path.as_ref();
        match SourceKind::from_path(path) {
            SourceKind::Csv => Ok(DataSource::Streamed(CsvSource::open(path, config)?)),
            SourceKind::Excel => Ok(DataSource::Sheets(Arc::new(SheetCollection::open(path)?))),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            DataSource::Streamed(_) => SourceKind::Csv,
            DataSource::Sheets(_) => SourceKind::Excel,
        }
    }
}
