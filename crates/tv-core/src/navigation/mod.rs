//! Page navigation
//!
//! The cursor only knows the index of the chunk on screen. Whether a page
//! exists past the current one is decided by the reader that owns the data.

mod cursor;

pub use cursor::PageCursor;

/// Result of a page navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The cursor now points at the given page
    Moved(usize),
    /// Nothing changed (e.g. previous page while on the first one)
    Unchanged,
    /// The source has no more rows; the cursor was left where it was
    EndOfData,
}

impl PageOutcome {
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, PageOutcome::EndOfData)
    }
}
