//! Reader configuration

use serde::{Deserialize, Serialize};
use tv_core::DEFAULT_CHUNK_SIZE;

/// How tabular files are parsed and paged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Rows per page of a streamed table
    pub chunk_size: usize,

    /// Field delimiter for CSV files
    pub delimiter: u8,

    /// Whether the first CSV record names the columns
    pub has_headers: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            delimiter: b',',
            has_headers: true,
        }
    }
}

impl ReaderConfig {
    /// Same settings with a different page size (clamped to at least one row)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}
