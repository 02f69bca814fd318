use egui::{Context, Key, TopBottomPanel};

use crate::icons;

/// A toolbar request for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Open,
    PrevPage,
    NextPage,
    Search,
    Copy,
    SelectSheet(usize),
}

/// What the toolbar shows besides its buttons
pub struct ToolbarState<'a> {
    /// Text of the search box, edited in place
    pub search_text: &'a mut String,
    /// Status line on the right ("Rows 1 – 5000", "No file loaded", ...)
    pub status: &'a str,
    /// Sheet names of an open workbook
    pub sheets: &'a [String],
    pub selected_sheet: Option<usize>,
}

/// Render the top toolbar and report the action the user picked this frame
pub fn toolbar(ctx: &Context, state: ToolbarState<'_>) -> Option<ToolbarAction> {
    let mut action = None;

    TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button(format!("{} Open CSV/Excel", icons::FOLDER)).clicked() {
                action = Some(ToolbarAction::Open);
            }
            if ui.button(format!("{} Prev", icons::PREV)).clicked() {
                action = Some(ToolbarAction::PrevPage);
            }
            if ui.button(format!("Next {}", icons::NEXT)).clicked() {
                action = Some(ToolbarAction::NextPage);
            }

            if !state.sheets.is_empty() {
                let selected_text = state
                    .selected_sheet
                    .and_then(|i| state.sheets.get(i))
                    .cloned()
                    .unwrap_or_default();

                egui::ComboBox::from_id_source("sheet_selector")
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for (idx, name) in state.sheets.iter().enumerate() {
                            if ui.selectable_label(state.selected_sheet == Some(idx), name).clicked() {
                                action = Some(ToolbarAction::SelectSheet(idx));
                            }
                        }
                    });
            }

            ui.separator();
            ui.label("Search:");
            let response = ui.add(egui::TextEdit::singleline(state.search_text).desired_width(180.0));
            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                action = Some(ToolbarAction::Search);
            }
            if ui.button("Find").clicked() {
                action = Some(ToolbarAction::Search);
            }

            ui.separator();
            if ui
                .button(format!("{} Copy", icons::COPY))
                .on_hover_text("Copy selected rows (Ctrl+C)")
                .clicked()
            {
                action = Some(ToolbarAction::Copy);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(state.status);
            });
        });
        ui.add_space(4.0);
    });

    action
}
