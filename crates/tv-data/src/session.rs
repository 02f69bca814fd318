//! Viewing session
//!
//! A session is one opened file: its source, the reader paging through it,
//! and the last successful search query. Opening another file builds a new
//! session that replaces the old one as a whole.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use tv_core::{Chunk, PageOutcome};

use crate::config::ReaderConfig;
use crate::reader::PaginatedReader;
use crate::search::{search, SearchOutcome};
use crate::sources::{DataSource, SourceKind};
use crate::DataError;

/// An opened tabular file
pub struct Session {
    path: PathBuf,
    source: DataSource,
    reader: PaginatedReader,
    last_query: Option<String>,
}

impl Session {
    /// Open a file with the default reader settings
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::open_with_config(path, &ReaderConfig::default())
    }

    pub fn open_with_config(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self, DataError> {
        let path = path.as_ref().to_path_buf();
        let source = DataSource::open(&path, config).map_err(|e| {
            warn!("Failed to open {:?}: {}", path, e);
            e
        })?;
        let reader = PaginatedReader::from_source(&source, config)?;

        info!("Session opened for {:?}", path);
        Ok(Self {
            path,
            source,
            reader,
            last_query: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for window titles
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn reader(&self) -> &PaginatedReader {
        &self.reader
    }

    pub fn current_page(&mut self) -> Result<Option<&Chunk>, DataError> {
        self.reader.current_page()
    }

    pub fn next_page(&mut self) -> Result<PageOutcome, DataError> {
        self.reader.next_page()
    }

    pub fn prev_page(&mut self) -> PageOutcome {
        self.reader.prev_page()
    }

    pub fn select_sheet(&mut self, index: usize) -> Result<(), DataError> {
        self.reader.select_sheet(index)
    }

    /// Search the whole file; remembers the query when rows were found
    pub fn search(&mut self, query: &str) -> Result<SearchOutcome, DataError> {
        let outcome = search(&self.source, query)?;
        if let SearchOutcome::Found(results) = &outcome {
            self.last_query = Some(results.query().to_string());
        }
        Ok(outcome)
    }

    /// Lowercased query of the last search that found rows
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }
}
