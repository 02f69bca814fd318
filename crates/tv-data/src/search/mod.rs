//! Whole-file substring search
//!
//! A search never looks at the paginated reader's cache. Streamed tables are
//! re-read from disk in fresh batches; workbooks are scanned sheet by sheet
//! from memory. Matching is plain substring containment on lowercased text.

use std::sync::Arc;

use tracing::info;
use tv_core::Chunk;

use crate::sources::DataSource;
use crate::DataError;

/// A matching row and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    /// 1-based row number in the file (or in the sheet)
    pub row_number: usize,
    /// Originating sheet, for workbooks
    pub sheet: Option<String>,
    /// Column names of the table the row belongs to
    pub columns: Arc<[String]>,
    /// Cells in column order; `None` for null cells
    pub cells: Vec<Option<String>>,
}

impl SearchMatch {
    /// Cell text for a column name, if the row's table has that column
    pub fn value(&self, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.cells.get(idx)?.as_deref()
    }
}

/// Matches of one search, in source order
#[derive(Debug, Clone)]
pub struct SearchResults {
    query: String,
    matches: Vec<SearchMatch>,
}

impl SearchResults {
    /// The lowercased query that produced these matches
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Columns of the first match's table, used to lay out every result
    pub fn columns(&self) -> &[String] {
        self.matches.first().map(|m| &m.columns[..]).unwrap_or(&[])
    }

    /// Whether results carry sheet names
    pub fn has_sheets(&self) -> bool {
        self.matches.iter().any(|m| m.sheet.is_some())
    }
}

/// What a search produced
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Nothing to search for
    EmptyQuery,
    /// The file was scanned and no row matched
    NoMatches,
    Found(SearchResults),
}

/// Scan the whole source for rows containing `query` in any column,
/// ignoring case
pub fn search(source: &DataSource, query: &str) -> Result<SearchOutcome, DataError> {
    if query.is_empty() {
        return Ok(SearchOutcome::EmptyQuery);
    }

    let needle = query.to_lowercase();
    let mut matches = Vec::new();

    match source {
        DataSource::Streamed(csv) => {
            info!("Searching {:?} for '{}'", csv.path(), needle);
            for chunk in csv.batches()? {
                collect_matches(&chunk?, &needle, None, &mut matches);
            }
        }
        DataSource::Sheets(sheets) => {
            info!("Searching {} sheets for '{}'", sheets.len(), needle);
            for (name, chunk) in sheets.iter() {
                collect_matches(chunk, &needle, Some(name), &mut matches);
            }
        }
    }

    info!("Search for '{}' found {} rows", needle, matches.len());

    if matches.is_empty() {
        Ok(SearchOutcome::NoMatches)
    } else {
        Ok(SearchOutcome::Found(SearchResults { query: needle, matches }))
    }
}

/// Whether any non-null cell of the row contains the lowercased needle
pub fn row_matches(chunk: &Chunk, row: usize, needle: &str) -> bool {
    (0..chunk.num_columns()).any(|col| {
        chunk
            .cell(row, col)
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

fn collect_matches(chunk: &Chunk, needle: &str, sheet: Option<&str>, out: &mut Vec<SearchMatch>) {
    let mut columns: Option<Arc<[String]>> = None;

    for row in 0..chunk.num_rows() {
        if !row_matches(chunk, row, needle) {
            continue;
        }

        let columns = columns
            .get_or_insert_with(|| chunk.column_names().into())
            .clone();

        out.push(SearchMatch {
            row_number: chunk.row_number(row),
            sheet: sheet.map(str::to_string),
            columns,
            cells: chunk.row_cells(row),
        });
    }
}
