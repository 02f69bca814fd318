//! Native dialogs

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use tracing::debug;
use tv_core::{Notice, NoticeLevel};

/// Extensions offered by the open dialog
pub const OPENABLE_EXTENSIONS: &[&str] = &["csv", "xlsx"];

/// Ask the user for a CSV or Excel file
pub fn pick_table_file() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("CSV / Excel files", OPENABLE_EXTENSIONS)
        .pick_file()
}

/// Show a notice in a blocking message box
pub fn show_notice(notice: &Notice) {
    let level = match notice.level() {
        NoticeLevel::Info => MessageLevel::Info,
        NoticeLevel::Error => MessageLevel::Error,
    };
    let message = notice.message();
    debug!("Showing notice: {}", message);

    let _ = MessageDialog::new()
        .set_level(level)
        .set_title(notice.title())
        .set_description(&message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
