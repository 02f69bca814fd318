//! Core functionality for the table viewer
//!
//! This crate provides the fundamental abstractions shared by the data layer
//! and the views: the text-cell table model, the page cursor, user-facing
//! notices and application settings.

pub mod events;
pub mod navigation;
pub mod state;
pub mod table;

// Re-export commonly used types
pub use events::{Notice, NoticeLevel};
pub use navigation::{PageCursor, PageOutcome};
pub use state::AppSettings;
pub use table::{build_text_batch, text_schema, Chunk};

/// Number of rows in a full page of a streamed table
pub const DEFAULT_CHUNK_SIZE: usize = 5000;
