//! Search highlighting of the visible page
//!
//! Works on the strings the grid shows (row number included), not on the
//! search results.

use ahash::AHashSet;
use tv_core::Chunk;

/// Rows of the page whose rendered values contain the lowercased needle
pub fn matching_rows(chunk: &Chunk, needle: &str) -> AHashSet<usize> {
    if needle.is_empty() {
        return AHashSet::new();
    }

    (0..chunk.num_rows())
        .filter(|&row| {
            chunk
                .display_row(row)
                .iter()
                .any(|value| value.to_lowercase().contains(needle))
        })
        .collect()
}
