//! Grid views for the table viewer: the page table and search result windows

pub mod export;
pub mod highlight;
mod search_results;
pub mod selection;
mod tables;

pub use export::{copy_to_clipboard, rows_to_tsv};
pub use highlight::matching_rows;
pub use search_results::{result_header, result_row, SearchResultsView};
pub use selection::{ClickModifiers, RowSelection};
pub use tables::{show_grid, GridResponse, PageTableView, TableConfig};
