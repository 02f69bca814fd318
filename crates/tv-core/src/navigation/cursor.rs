/// Index of the chunk currently displayed, bounded below at 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
}

impl PageCursor {
    /// Create a cursor on the first page
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Step forward, returning the page the cursor was on before
    pub fn advance(&mut self) -> usize {
        let previous = self.page;
        self.page += 1;
        previous
    }

    /// Step back. Returns false (and stays put) on the first page.
    pub fn retreat(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Undo a failed advance
    pub fn revert_to(&mut self, page: usize) {
        self.page = page;
    }

    /// Back to the first page
    pub fn reset(&mut self) {
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retreat_never_goes_below_zero() {
        let mut cursor = PageCursor::new();
        assert!(!cursor.retreat());
        assert_eq!(cursor.page(), 0);

        cursor.advance();
        assert!(cursor.retreat());
        assert_eq!(cursor.page(), 0);
    }

    #[test]
    fn test_advance_and_revert() {
        let mut cursor = PageCursor::new();
        cursor.advance();
        let previous = cursor.advance();
        assert_eq!(previous, 1);
        assert_eq!(cursor.page(), 2);

        cursor.revert_to(previous);
        assert_eq!(cursor.page(), 1);

        cursor.reset();
        assert_eq!(cursor.page(), 0);
    }
}
