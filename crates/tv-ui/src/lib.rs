//! User interface components for the table viewer
//!
//! This crate provides the egui-based toolbar, the theme and the native
//! dialogs used by the application.

pub mod dialogs;
pub mod shell;
pub mod theme;

/// Re-export commonly used types
pub use dialogs::{pick_table_file, show_notice};
pub use shell::{toolbar, ToolbarAction, ToolbarState};
pub use theme::{apply_theme, Theme};

// Common icon definitions
pub mod icons {
    pub const PREV: &str = "◀";
    pub const NEXT: &str = "▶";
    pub const FOLDER: &str = "📁";
    pub const COPY: &str = "📋";
}
