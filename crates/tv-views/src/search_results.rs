//! Search results window

use ahash::AHashSet;
use egui::{Context, Id};
use tv_data::{SearchMatch, SearchResults};

use crate::export::rows_to_tsv;
use crate::selection::RowSelection;
use crate::tables::{show_grid, GridResponse, TableConfig};

/// Header of the results grid: `Row #`, `Sheet` for workbooks, then the
/// columns of the first match's table
pub fn result_header(results: &SearchResults) -> Vec<String> {
    let mut header = vec!["Row #".to_string()];
    if results.has_sheets() {
        header.push("Sheet".to_string());
    }
    header.extend(results.columns().iter().cloned());
    header
}

/// One match laid out under [`result_header`]; columns the match's own table
/// lacks are left empty
pub fn result_row(results: &SearchResults, m: &SearchMatch) -> Vec<String> {
    let mut row = vec![m.row_number.to_string()];
    if results.has_sheets() {
        row.push(m.sheet.clone().unwrap_or_default());
    }
    for column in results.columns() {
        row.push(m.value(column).unwrap_or_default().to_string());
    }
    row
}

/// A window listing every match of one search
pub struct SearchResultsView {
    id: Id,
    title: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    selection: RowSelection,
    config: TableConfig,
    default_size: [f32; 2],
    open: bool,
}

impl SearchResultsView {
    /// `serial` keeps windows of repeated searches apart
    pub fn new(results: &SearchResults, serial: usize, config: TableConfig, default_size: [f32; 2]) -> Self {
        let rows = results
            .matches()
            .iter()
            .map(|m| result_row(results, m))
            .collect();

        Self {
            id: Id::new(("search_results", serial)),
            title: format!("Search results for '{}'", results.query()),
            header: result_header(results),
            rows,
            selection: RowSelection::new(),
            config,
            default_size,
            open: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selection_mut(&mut self) -> &mut RowSelection {
        &mut self.selection
    }

    /// Selected matches as clipboard text
    pub fn copy_text(&self) -> Option<String> {
        rows_to_tsv(self.selection.rows().filter_map(|row| self.rows.get(row)))
    }

    pub fn show(&mut self, ctx: &Context) -> GridResponse {
        let mut response = GridResponse::default();
        let mut open = self.open;

        egui::Window::new(self.title.as_str())
            .id(self.id)
            .open(&mut open)
            .default_size(self.default_size)
            .resizable(true)
            .show(ctx, |ui| {
                ui.label(format!("{} matching rows", self.rows.len()));
                ui.separator();

                let rows = &self.rows;
                response = show_grid(
                    ui,
                    self.id,
                    &self.config,
                    &self.header,
                    rows.len(),
                    |row| rows[row].clone(),
                    &AHashSet::new(),
                    &mut self.selection,
                );
            });

        self.open = open;
        response
    }
}
