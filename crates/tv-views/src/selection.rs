//! Row selection for grids
//!
//! Extended selection as in a file list: a plain click selects one row, a
//! command/ctrl click toggles a row, a shift click selects the range from the
//! last plain click.

use std::collections::BTreeSet;

/// Modifier state of a row click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub toggle: bool,
    pub extend: bool,
}

impl From<egui::Modifiers> for ClickModifiers {
    fn from(modifiers: egui::Modifiers) -> Self {
        Self {
            toggle: modifiers.command,
            extend: modifiers.shift,
        }
    }
}

/// Selected rows of a grid, by row index
#[derive(Debug, Clone, Default)]
pub struct RowSelection {
    rows: BTreeSet<usize>,
    anchor: Option<usize>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `row`
    pub fn click(&mut self, row: usize, modifiers: ClickModifiers) {
        match (modifiers.extend, self.anchor) {
            (true, Some(anchor)) => {
                if !modifiers.toggle {
                    self.rows.clear();
                }
                let (start, end) = if anchor <= row { (anchor, row) } else { (row, anchor) };
                self.rows.extend(start..=end);
            }
            _ if modifiers.toggle => {
                if !self.rows.remove(&row) {
                    self.rows.insert(row);
                }
                self.anchor = Some(row);
            }
            _ => {
                self.rows.clear();
                self.rows.insert(row);
                self.anchor = Some(row);
            }
        }
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    /// Selected rows in display order
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: ClickModifiers = ClickModifiers { toggle: false, extend: false };
    const TOGGLE: ClickModifiers = ClickModifiers { toggle: true, extend: false };
    const EXTEND: ClickModifiers = ClickModifiers { toggle: false, extend: true };

    #[test]
    fn test_plain_click_replaces_selection() {
        let mut selection = RowSelection::new();
        selection.click(3, PLAIN);
        selection.click(5, PLAIN);

        assert_eq!(selection.rows().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_toggle_click() {
        let mut selection = RowSelection::new();
        selection.click(3, PLAIN);
        selection.click(1, TOGGLE);
        assert_eq!(selection.rows().collect::<Vec<_>>(), vec![1, 3]);

        selection.click(3, TOGGLE);
        assert_eq!(selection.rows().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_shift_click_selects_range_from_anchor() {
        let mut selection = RowSelection::new();
        selection.click(6, PLAIN);
        selection.click(3, EXTEND);
        assert_eq!(selection.rows().collect::<Vec<_>>(), vec![3, 4, 5, 6]);

        selection.click(8, EXTEND);
        assert_eq!(selection.rows().collect::<Vec<_>>(), vec![6, 7, 8]);
    }

    #[test]
    fn test_shift_click_without_anchor_selects_one_row() {
        let mut selection = RowSelection::new();
        selection.click(4, EXTEND);

        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected(4));

        selection.clear();
        assert!(selection.is_empty());
    }
}
