//! Application state and frame loop

use std::path::PathBuf;

use eframe::egui::{self, Context};
use tracing::{error, info, warn};

use tv_core::{AppSettings, Notice, PageOutcome};
use tv_data::{SearchOutcome, Session};
use tv_ui::{ToolbarAction, ToolbarState};
use tv_views::{copy_to_clipboard, GridResponse, PageTableView, SearchResultsView, TableConfig};

/// Grid that receives copy requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveGrid {
    Page,
    /// Results window with the given serial
    Results(usize),
}

/// Main application state
pub struct TableViewerApp {
    settings: AppSettings,

    /// The open file, if any; replaced as a whole on open
    session: Option<Session>,

    page_view: PageTableView,

    /// Open search result windows with their serials
    results: Vec<(usize, SearchResultsView)>,
    searches_run: usize,

    search_text: String,
    active_grid: ActiveGrid,
    table_config: TableConfig,

    /// Notices waiting to be shown after this frame
    notices: Vec<Notice>,
}

impl TableViewerApp {
    pub fn new(settings: AppSettings) -> Self {
        let table_config = TableConfig {
            found_color: tv_ui::theme::found_color(),
            ..TableConfig::default()
        };

        Self {
            settings,
            session: None,
            page_view: PageTableView::new(table_config.clone()),
            results: Vec::new(),
            searches_run: 0,
            search_text: String::new(),
            active_grid: ActiveGrid::Page,
            table_config,
            notices: Vec::new(),
        }
    }

    /// Open a file. On failure the previous session stays as it was.
    pub fn open_file(&mut self, path: PathBuf) {
        info!("Opening file: {:?}", path);

        match Session::open(&path) {
            Ok(session) => {
                self.session = Some(session);
                self.page_view.reset();
                self.active_grid = ActiveGrid::Page;
            }
            Err(e) => {
                error!("Failed to open {:?}: {}", path, e);
                self.notices.push(Notice::OpenFailed {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    pub fn next_page(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.next_page() {
            Ok(PageOutcome::EndOfData) => self.notices.push(Notice::EndOfFile),
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read next page: {}", e);
                self.notices.push(Notice::ReadFailed { error: e.to_string() });
            }
        }
    }

    pub fn prev_page(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.prev_page();
        }
    }

    pub fn select_sheet(&mut self, index: usize) {
        if let Some(session) = self.session.as_mut() {
            if let Err(e) = session.select_sheet(index) {
                error!("Failed to select sheet {}: {}", index, e);
            }
        }
    }

    /// Search the open file for the text in the search box
    pub fn search(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if self.search_text.is_empty() {
            return;
        }

        match session.search(&self.search_text) {
            Ok(SearchOutcome::EmptyQuery) => {}
            Ok(SearchOutcome::NoMatches) => {
                self.notices.push(Notice::NothingFound {
                    query: self.search_text.clone(),
                });
            }
            Ok(SearchOutcome::Found(results)) => {
                let serial = self.searches_run;
                self.searches_run += 1;
                self.results.push((
                    serial,
                    SearchResultsView::new(
                        &results,
                        serial,
                        self.table_config.clone(),
                        self.settings.results_window_size,
                    ),
                ));

                let sheet = session.reader().selected_sheet().map(str::to_string);
                let page = session.reader().page();
                self.page_view.sync_page(sheet.as_deref(), page);
                match session.current_page() {
                    Ok(Some(chunk)) => self.page_view.highlight(chunk, results.query()),
                    Ok(None) => {}
                    Err(e) => warn!("Cannot highlight page {}: {}", page, e),
                }
            }
            Err(e) => {
                error!("Search failed: {}", e);
                self.notices.push(Notice::ReadFailed { error: e.to_string() });
            }
        }
    }

    /// Clipboard text for the selection of the grid last interacted with
    fn selection_text(&self) -> Option<String> {
        match self.active_grid {
            ActiveGrid::Page => {
                let chunk = self.session.as_ref()?.reader().cached_page()?;
                self.page_view.copy_text(chunk)
            }
            ActiveGrid::Results(serial) => self
                .results
                .iter()
                .find(|(s, _)| *s == serial)
                .and_then(|(_, view)| view.copy_text()),
        }
    }

    fn copy_selection(&self, ctx: &Context) {
        if let Some(text) = self.selection_text() {
            copy_to_clipboard(ctx, text);
        }
    }

    fn status(&self) -> String {
        self.session
            .as_ref()
            .map(|s| format!("{}  |  {}", s.file_name(), s.reader().page_label()))
            .unwrap_or_else(|| "No file loaded".to_string())
    }

    fn handle_action(&mut self, ctx: &Context, action: ToolbarAction) {
        match action {
            ToolbarAction::Open => {
                if let Some(path) = tv_ui::pick_table_file() {
                    self.open_file(path);
                }
            }
            ToolbarAction::PrevPage => self.prev_page(),
            ToolbarAction::NextPage => self.next_page(),
            ToolbarAction::Search => self.search(),
            ToolbarAction::Copy => self.copy_selection(ctx),
            ToolbarAction::SelectSheet(index) => self.select_sheet(index),
        }
    }

    fn track_grid(&mut self, grid: ActiveGrid, response: GridResponse) -> bool {
        if response.interacted {
            self.active_grid = grid;
        }
        response.copy_requested
    }

    fn page_panel(&mut self, ctx: &Context) -> GridResponse {
        let mut response = GridResponse::default();

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = self.session.as_mut() else {
                ui.centered_and_justified(|ui| {
                    ui.label("Open a CSV or Excel file to start");
                });
                return;
            };

            let sheet = session.reader().selected_sheet().map(str::to_string);
            let page = session.reader().page();
            self.page_view.sync_page(sheet.as_deref(), page);

            match session.current_page() {
                Ok(chunk) => response = self.page_view.ui(ui, chunk),
                Err(e) => {
                    ui.colored_label(egui::Color32::RED, format!("Cannot read page: {}", e));
                }
            }
        });

        response
    }
}

impl eframe::App for TableViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let status = self.status();
        let sheets = self
            .session
            .as_ref()
            .map(|s| s.reader().sheet_names())
            .unwrap_or_default();
        let selected_sheet = self.session.as_ref().and_then(|s| {
            let selected = s.reader().selected_sheet()?;
            sheets.iter().position(|name| name == selected)
        });

        let action = tv_ui::toolbar(
            ctx,
            ToolbarState {
                search_text: &mut self.search_text,
                status: &status,
                sheets: &sheets,
                selected_sheet,
            },
        );
        if let Some(action) = action {
            self.handle_action(ctx, action);
        }

        let page_response = self.page_panel(ctx);
        let mut copy_requested = self.track_grid(ActiveGrid::Page, page_response);

        let mut result_responses = Vec::with_capacity(self.results.len());
        for (serial, view) in &mut self.results {
            result_responses.push((*serial, view.show(ctx)));
        }
        for (serial, response) in result_responses {
            copy_requested |= self.track_grid(ActiveGrid::Results(serial), response);
        }
        self.results.retain(|(_, view)| view.is_open());
        if let ActiveGrid::Results(serial) = self.active_grid {
            if !self.results.iter().any(|(s, _)| *s == serial) {
                self.active_grid = ActiveGrid::Page;
            }
        }

        // Ctrl+C arrives as a copy event; leave it to the search box while it has focus
        let copy_shortcut = !ctx.wants_keyboard_input()
            && ctx.input(|i| i.events.iter().any(|e| matches!(e, egui::Event::Copy)));
        if copy_requested || copy_shortcut {
            self.copy_selection(ctx);
        }

        for notice in std::mem::take(&mut self.notices) {
            tv_ui::show_notice(&notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tv_views::ClickModifiers;

    fn people_csv() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "name,age\nAlice,42\nbob,99\nCARL,42").unwrap();
        file.flush().unwrap();
        file
    }

    fn app_with(file: &NamedTempFile) -> TableViewerApp {
        let mut app = TableViewerApp::new(AppSettings::default());
        app.open_file(file.path().to_path_buf());
        assert!(app.session.is_some());
        app
    }

    #[test]
    fn test_open_failure_keeps_app_running() {
        let mut app = TableViewerApp::new(AppSettings::default());
        app.open_file(PathBuf::from("/no/such/file.csv"));

        assert!(app.session.is_none());
        assert!(matches!(app.notices.as_slice(), [Notice::OpenFailed { .. }]));
        assert_eq!(app.status(), "No file loaded");
    }

    #[test]
    fn test_next_page_past_end_notifies() {
        let file = people_csv();
        let mut app = app_with(&file);

        app.next_page();
        assert_eq!(app.notices, vec![Notice::EndOfFile]);
        assert_eq!(app.session.as_ref().unwrap().reader().page(), 0);
    }

    #[test]
    fn test_next_page_on_workbook_is_silent() {
        let workbook = concat!(env!("CARGO_MANIFEST_DIR"), "/../tv-data/fixtures/workbook.xlsx");
        let mut app = TableViewerApp::new(AppSettings::default());
        app.open_file(PathBuf::from(workbook));
        assert!(app.session.is_some());

        app.next_page();
        assert!(app.notices.is_empty());
        assert_eq!(app.session.as_ref().unwrap().reader().selected_sheet(), Some("Jan"));
    }

    #[test]
    fn test_search_opens_results_and_highlights_page() {
        let file = people_csv();
        let mut app = app_with(&file);
        app.search_text = "42".to_string();

        app.search();

        assert!(app.notices.is_empty());
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].1.len(), 2);
        let highlighted = app.page_view.highlighted_rows();
        assert!(highlighted.contains(&0) && highlighted.contains(&2));
    }

    #[test]
    fn test_search_without_matches_notifies() {
        let file = people_csv();
        let mut app = app_with(&file);
        app.search_text = "xyz".to_string();

        app.search();

        assert!(app.results.is_empty());
        assert_eq!(app.notices, vec![Notice::NothingFound { query: "xyz".to_string() }]);
    }

    #[test]
    fn test_empty_query_or_no_file_does_nothing() {
        let mut app = TableViewerApp::new(AppSettings::default());
        app.search_text = "42".to_string();
        app.search();
        assert!(app.notices.is_empty());

        let file = people_csv();
        let mut app = app_with(&file);
        app.search();
        assert!(app.notices.is_empty());
        assert!(app.results.is_empty());
    }

    #[test]
    fn test_copy_follows_last_used_grid() {
        let file = people_csv();
        let mut app = app_with(&file);
        assert_eq!(app.selection_text(), None);

        app.page_view.selection_mut().click(0, ClickModifiers::default());
        app.page_view
            .selection_mut()
            .click(1, ClickModifiers { toggle: true, extend: false });
        assert_eq!(app.selection_text().as_deref(), Some("1\tAlice\t42\n2\tbob\t99"));

        app.search_text = "carl".to_string();
        app.search();
        app.results[0].1.selection_mut().click(0, ClickModifiers::default());
        app.active_grid = ActiveGrid::Results(app.results[0].0);
        assert_eq!(app.selection_text().as_deref(), Some("3\tCARL\t42"));
    }
}
