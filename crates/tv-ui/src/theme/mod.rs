use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Viewer Light".to_string(),
            dark_mode: false,
        }
    }
}

/// Apply the application theme (light grid with shaded odd rows)
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    let text_color = if theme.dark_mode {
        Color32::from_rgb(220, 220, 220)
    } else {
        Color32::from_rgb(30, 30, 30)
    };

    if !theme.dark_mode {
        visuals.panel_fill = Color32::from_rgb(250, 250, 250);
        visuals.window_fill = Color32::WHITE;
        visuals.extreme_bg_color = Color32::WHITE;
        visuals.faint_bg_color = stripe_color();
    }

    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.noninteractive.rounding = Rounding::same(3.0);
    visuals.widgets.inactive.rounding = Rounding::same(3.0);
    visuals.widgets.hovered.rounding = Rounding::same(3.0);
    visuals.widgets.active.rounding = Rounding::same(3.0);

    // Selection and highlighting
    visuals.selection.bg_fill = accent_color().linear_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());
    visuals.hyperlink_color = accent_color();

    // Apply spacing
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);

    // Font sizes
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));

    style.text_styles = font_sizes;

    // Apply the style and visuals
    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(66, 133, 244)
}

/// Background of odd grid rows
pub fn stripe_color() -> Color32 {
    Color32::from_rgb(0xf0, 0xf0, 0xf0)
}

/// Background of rows matching the last search
pub fn found_color() -> Color32 {
    Color32::from_rgb(0xff, 0xeb, 0x3b)
}
