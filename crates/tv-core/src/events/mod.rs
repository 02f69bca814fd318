//! User-facing notices
//!
//! Outcomes the user has to acknowledge (a file that will not open, the end
//! of the data, an empty search). The UI decides how to show them.

use std::path::PathBuf;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The file could not be opened or parsed
    OpenFailed {
        path: PathBuf,
        error: String,
    },

    /// A later batch of an open file could not be read
    ReadFailed {
        error: String,
    },

    /// Next page requested past the last page
    EndOfFile,

    /// A search produced no rows
    NothingFound {
        query: String,
    },
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::OpenFailed { .. } | Notice::ReadFailed { .. } => NoticeLevel::Error,
            Notice::EndOfFile | Notice::NothingFound { .. } => NoticeLevel::Info,
        }
    }

    /// Dialog title
    pub fn title(&self) -> &'static str {
        match self {
            Notice::OpenFailed { .. } | Notice::ReadFailed { .. } => "Error",
            Notice::EndOfFile => "End",
            Notice::NothingFound { .. } => "Search",
        }
    }

    /// Dialog body
    pub fn message(&self) -> String {
        match self {
            Notice::OpenFailed { path, error } => {
                format!("Cannot open file {}:\n{}", path.display(), error)
            }
            Notice::ReadFailed { error } => format!("Cannot read file:\n{}", error),
            Notice::EndOfFile => "End of file".to_string(),
            Notice::NothingFound { .. } => "Nothing found".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_levels() {
        let failed = Notice::OpenFailed {
            path: PathBuf::from("broken.csv"),
            error: "bad header".to_string(),
        };
        assert_eq!(failed.level(), NoticeLevel::Error);
        assert!(failed.message().contains("broken.csv"));

        assert_eq!(Notice::EndOfFile.level(), NoticeLevel::Info);
        assert_eq!(Notice::EndOfFile.message(), "End of file");
        assert_eq!(
            Notice::NothingFound { query: "xyz".to_string() }.message(),
            "Nothing found"
        );
    }
}
