//! Application settings

/// Window settings for the viewer
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Default size of a search results window
    pub results_window_size: [f32; 2],
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            title: "CSV / Excel Viewer".to_string(),
            inner_size: [1250.0, 720.0],
            min_inner_size: [640.0, 400.0],
            results_window_size: [1000.0, 500.0],
        }
    }
}
