//! Clipboard export of grid rows

use tracing::debug;

/// Join rows as tab-separated values, one line per row.
///
/// Returns `None` when there are no rows, so callers leave the clipboard
/// untouched.
pub fn rows_to_tsv<I, R, S>(rows: I) -> Option<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|value| value.as_ref().to_string())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Hand text to the system clipboard.
///
/// The platform layer applies it at the end of the frame; failures there are
/// not reported back.
pub fn copy_to_clipboard(ctx: &egui::Context, text: String) {
    debug!("Copying {} lines to clipboard", text.lines().count());
    ctx.output_mut(|o| o.copied_text = text);
}
