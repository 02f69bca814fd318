//! Paginated reader
//!
//! Pages through a source one chunk at a time. Streamed tables are read
//! lazily: a chunk is pulled from the stream only when the cursor first
//! reaches it, then kept in the cache for good. A workbook shows one sheet at
//! a time as a single page.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};
use tv_core::{Chunk, PageCursor, PageOutcome};

use crate::cache::ChunkCache;
use crate::config::ReaderConfig;
use crate::sources::{CsvBatchStream, CsvSource, DataSource, SheetCollection};
use crate::DataError;

enum Backing {
    /// `None` once the stream is exhausted
    Stream(Option<CsvBatchStream>),
    Sheets {
        sheets: Arc<SheetCollection>,
        selected: usize,
    },
}

/// Fixed-size pages over a tabular source
pub struct PaginatedReader {
    config: ReaderConfig,
    backing: Backing,
    cursor: PageCursor,
    cache: ChunkCache,
}

impl PaginatedReader {
    /// Open a file, choosing CSV or workbook paging from its extension
    pub fn open(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self, DataError> {
        let source = DataSource::open(path, config)?;
        Self::from_source(&source, config)
    }

    /// Page through a CSV file in batches of `config.chunk_size` rows
    pub fn open_csv(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self, DataError> {
        let source = CsvSource::open(path, config)?;
        Self::from_source(&DataSource::Streamed(source), config)
    }

    /// Load every sheet of a workbook and show the first one
    pub fn open_excel(path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self, DataError> {
        let sheets = SheetCollection::open(path)?;
        Self::from_source(&DataSource::Sheets(Arc::new(sheets)), config)
    }

    /// Start paging an opened source from its first page
    pub fn from_source(source: &DataSource, config: &ReaderConfig) -> Result<Self, DataError> {
        let backing = match source {
            DataSource::Streamed(csv) => Backing::Stream(Some(csv.batches()?)),
            DataSource::Sheets(sheets) => Backing::Sheets {
                sheets: sheets.clone(),
                selected: 0,
            },
        };

        let mut reader = Self {
            config: config.clone(),
            backing,
            cursor: PageCursor::new(),
            cache: ChunkCache::new(),
        };

        if let DataSource::Sheets(_) = source {
            reader.load_sheet(0)?;
        } else {
            reader.fill_to(0)?;
        }

        Ok(reader)
    }

    /// Index of the page on screen
    pub fn page(&self) -> usize {
        self.cursor.page()
    }

    /// Number of chunks read so far
    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }

    /// The chunk under the cursor, reading from the stream if needed.
    ///
    /// `None` when the source has no rows at that position.
    pub fn current_page(&mut self) -> Result<Option<&Chunk>, DataError> {
        let page = self.cursor.page();
        self.fill_to(page)?;
        Ok(self.cache.get(page))
    }

    /// The chunk under the cursor if it has already been read
    pub fn cached_page(&self) -> Option<&Chunk> {
        self.cache.get(self.cursor.page())
    }

    /// Move to the next page, reading one more batch when it is not cached.
    ///
    /// At the end of the data the cursor stays where it was. A workbook sheet
    /// is a single page, so this leaves it unchanged.
    pub fn next_page(&mut self) -> Result<PageOutcome, DataError> {
        if let Backing::Sheets { .. } = self.backing {
            return Ok(PageOutcome::Unchanged);
        }

        let previous = self.cursor.advance();
        let page = self.cursor.page();

        match self.fill_to(page) {
            Ok(true) => {
                debug!("Moved to page {}", page);
                Ok(PageOutcome::Moved(page))
            }
            Ok(false) => {
                self.cursor.revert_to(previous);
                info!("End of data after page {}", previous);
                Ok(PageOutcome::EndOfData)
            }
            Err(e) => {
                self.cursor.revert_to(previous);
                Err(e)
            }
        }
    }

    /// Move to the previous page; does nothing on the first page
    pub fn prev_page(&mut self) -> PageOutcome {
        if self.cursor.retreat() {
            PageOutcome::Moved(self.cursor.page())
        } else {
            PageOutcome::Unchanged
        }
    }

    /// Sheet names in workbook order; empty for streamed tables
    pub fn sheet_names(&self) -> Vec<String> {
        match &self.backing {
            Backing::Sheets { sheets, .. } => sheets.sheet_names().map(str::to_string).collect(),
            Backing::Stream(_) => Vec::new(),
        }
    }

    /// Name of the sheet on screen
    pub fn selected_sheet(&self) -> Option<&str> {
        match &self.backing {
            Backing::Sheets { sheets, selected } => sheets.get_index(*selected).map(|(name, _)| name),
            Backing::Stream(_) => None,
        }
    }

    /// Show another sheet of the workbook
    pub fn select_sheet(&mut self, index: usize) -> Result<(), DataError> {
        self.load_sheet(index)
    }

    /// Status line describing the rows on screen
    pub fn page_label(&self) -> String {
        match (self.selected_sheet(), self.cached_page()) {
            (Some(sheet), page) => {
                let rows = page.map(Chunk::num_rows).unwrap_or_default();
                format!("Sheet: {}, Rows 1 – {}", sheet, rows)
            }
            (None, Some(chunk)) => match chunk.last_row_number() {
                Some(last) => format!("Rows {} – {}", chunk.first_row_number(), last),
                None => "No rows".to_string(),
            },
            (None, None) => "No rows".to_string(),
        }
    }

    /// Read from the stream until `page` is cached. Returns false if the
    /// stream ran out first.
    fn fill_to(&mut self, page: usize) -> Result<bool, DataError> {
        while self.cache.len() <= page {
            match self.read_next()? {
                Some(chunk) => self.cache.push(chunk),
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn read_next(&mut self) -> Result<Option<Chunk>, DataError> {
        let Backing::Stream(stream) = &mut self.backing else {
            return Ok(None);
        };

        let Some(batches) = stream.as_mut() else {
            return Ok(None);
        };

        match batches.next() {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(e)) => Err(e),
            None => {
                debug!("Stream exhausted after {} rows", batches.rows_read());
                *stream = None;
                Ok(None)
            }
        }
    }

    fn load_sheet(&mut self, index: usize) -> Result<(), DataError> {
        let Backing::Sheets { sheets, selected } = &mut self.backing else {
            return Err(DataError::UnknownSheet(index.to_string()));
        };

        let (name, chunk) = sheets
            .get_index(index)
            .ok_or_else(|| DataError::UnknownSheet(index.to_string()))?;
        info!("Showing sheet '{}' ({} rows)", name, chunk.num_rows());

        let chunk = chunk.clone();
        *selected = index;
        self.cache.clear();
        self.cache.push(chunk);
        self.cursor.reset();
        Ok(())
    }
}
