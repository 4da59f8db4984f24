use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting, converting, or writing bookmarks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BookmarkError {
    /// Input file missing/unreadable, or output location unwritable.
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        /// The path that could not be read or written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed PDF or malformed XML input.
    #[error("format error: {0}")]
    Format(String),

    /// A bookmark target could not be mapped to a page.
    ///
    /// During extraction this is downgraded to `page: None`; it is only
    /// surfaced as an error when writing an outline into a PDF.
    #[error("page resolution error: {0}")]
    PageResolution(String),
}

impl BookmarkError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}
