//! Application entry point

// Hide the console window in release builds on Windows
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Result;
use eframe::egui;
use tracing::info;

use tv_core::AppSettings;
use tv_ui::Theme;

mod app;

use app::TableViewerApp;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let settings = AppSettings::default();
    info!("Starting {}", settings.title);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.title.clone())
            .with_inner_size(settings.inner_size)
            .with_min_inner_size(settings.min_inner_size),
        persist_window: false,
        ..Default::default()
    };

    let title = settings.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            tv_ui::apply_theme(&cc.egui_ctx, &Theme::default());
            Box::new(TableViewerApp::new(settings))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
