//! Table views
//!
//! [`show_grid`] draws a read-only, selectable grid; [`PageTableView`] uses it
//! for the page of the open file.

use std::hash::Hash;

use ahash::AHashSet;
use egui::{Color32, Ui};
use egui_extras::{Column, TableBuilder};
use tv_core::Chunk;

use crate::export::rows_to_tsv;
use crate::highlight::matching_rows;
use crate::selection::{ClickModifiers, RowSelection};

/// Configuration for table views
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub striped_rows: bool,
    pub resizable_columns: bool,
    pub column_width: f32,
    pub row_number_width: f32,
    /// Background of rows matching the last search
    pub found_color: Color32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            striped_rows: true,
            resizable_columns: true,
            column_width: 130.0,
            row_number_width: 70.0,
            found_color: Color32::from_rgb(0xff, 0xeb, 0x3b),
        }
    }
}

/// What the user did with a grid during this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct GridResponse {
    /// A row was clicked
    pub interacted: bool,
    /// "Copy" was chosen from the context menu
    pub copy_requested: bool,
}

/// Draw a grid whose first column is the row number column.
///
/// `row_values(i)` must return one value per header entry.
pub fn show_grid(
    ui: &mut Ui,
    id_source: impl Hash,
    config: &TableConfig,
    header: &[String],
    num_rows: usize,
    mut row_values: impl FnMut(usize) -> Vec<String>,
    highlighted: &AHashSet<usize>,
    selection: &mut RowSelection,
) -> GridResponse {
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
    let faint_bg_color = ui.visuals().faint_bg_color;
    let selection_bg_fill = ui.visuals().selection.bg_fill;
    let modifiers = ui.input(|i| i.modifiers);

    let mut clicked_row: Option<usize> = None;
    let mut copy_requested = false;

    ui.push_id(id_source, |ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(false)
            .resizable(config.resizable_columns)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .vscroll(true)
            .column(Column::initial(config.row_number_width).at_least(40.0));

        for _ in 1..header.len() {
            builder = builder.column(
                Column::initial(config.column_width)
                    .at_least(60.0)
                    .clip(true)
                    .resizable(config.resizable_columns),
            );
        }

        builder
            .header(20.0, |mut header_row| {
                for name in header {
                    header_row.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, num_rows, |row_index, mut row| {
                    let values = row_values(row_index);

                    let row_color = if selection.is_selected(row_index) {
                        Some(selection_bg_fill)
                    } else if highlighted.contains(&row_index) {
                        Some(config.found_color)
                    } else if config.striped_rows && row_index % 2 == 1 {
                        Some(faint_bg_color)
                    } else {
                        None
                    };

                    for value in &values {
                        row.col(|ui| {
                            if let Some(color) = row_color {
                                ui.painter().rect_filled(ui.available_rect_before_wrap(), 0.0, color);
                            }

                            let response = ui.add(egui::Label::new(value.as_str()).sense(egui::Sense::click()));
                            if response.clicked() {
                                clicked_row = Some(row_index);
                            }

                            response.context_menu(|ui| {
                                if ui.button("Copy").clicked() {
                                    copy_requested = true;
                                    ui.close_menu();
                                }
                            });
                        });
                    }
                });
            });
    });

    if let Some(row) = clicked_row {
        selection.click(row, ClickModifiers::from(modifiers));
    }

    GridResponse {
        interacted: clicked_row.is_some() || copy_requested,
        copy_requested,
    }
}

/// Grid showing the current page of the open file
pub struct PageTableView {
    pub config: TableConfig,
    selection: RowSelection,
    highlighted: AHashSet<usize>,
    /// (sheet, page) the selection and highlights belong to
    shown_page: Option<(Option<String>, usize)>,
}

impl PageTableView {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            selection: RowSelection::new(),
            highlighted: AHashSet::new(),
            shown_page: None,
        }
    }

    /// Forget selection and highlights when a different page is shown
    pub fn sync_page(&mut self, sheet: Option<&str>, page: usize) {
        let key = (sheet.map(str::to_string), page);
        if self.shown_page.as_ref() != Some(&key) {
            self.selection.clear();
            self.highlighted.clear();
            self.shown_page = Some(key);
        }
    }

    /// Drop all state, e.g. when another file is opened
    pub fn reset(&mut self) {
        self.selection.clear();
        self.highlighted.clear();
        self.shown_page = None;
    }

    /// Flag the rows of `chunk` whose rendered values contain `needle`
    pub fn highlight(&mut self, chunk: &Chunk, needle: &str) {
        self.highlighted = matching_rows(chunk, needle);
    }

    pub fn highlighted_rows(&self) -> &AHashSet<usize> {
        &self.highlighted
    }

    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut RowSelection {
        &mut self.selection
    }

    /// Selected rows of `chunk` as clipboard text
    pub fn copy_text(&self, chunk: &Chunk) -> Option<String> {
        rows_to_tsv(
            self.selection
                .rows()
                .filter(|&row| row < chunk.num_rows())
                .map(|row| chunk.display_row(row)),
        )
    }

    pub fn ui(&mut self, ui: &mut Ui, chunk: Option<&Chunk>) -> GridResponse {
        let Some(chunk) = chunk else {
            ui.centered_and_justified(|ui| {
                ui.label("No data to display");
            });
            return GridResponse::default();
        };

        let mut header = Vec::with_capacity(chunk.num_columns() + 1);
        header.push("#".to_string());
        header.extend(chunk.column_names());

        show_grid(
            ui,
            "page_table",
            &self.config,
            &header,
            chunk.num_rows(),
            |row| chunk.display_row(row),
            &self.highlighted,
            &mut self.selection,
        )
    }
}
