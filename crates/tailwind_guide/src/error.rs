//! Error type shared by the builder and the rendering pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[cfg(feature = "bookmarks")]
use crate::bookmarks::BookmarkError;

/// Errors produced while assembling or rendering a document.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A bullet list was appended without any items.
    #[error("bullet lists need at least one item")]
    EmptyList,
    /// A spacer height was zero, negative or not a finite number.
    #[error("spacer height must be positive and finite, got {height}")]
    InvalidSpacer {
        /// The rejected height in points.
        height: f64,
    },
    /// No usable font family could be loaded for the document body.
    #[error("failed to load fonts")]
    FontLoad(#[source] genpdf::error::Error),
    /// Layout or PDF serialization failed inside `genpdf`.
    #[error("failed to render PDF document")]
    Render(#[source] genpdf::error::Error),
    /// Writing the rendered document to disk failed.
    #[error("failed to write {}", path.display())]
    Io {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Injecting the heading outline into the rendered bytes failed.
    #[cfg(feature = "bookmarks")]
    #[error("failed to add bookmarks")]
    Bookmarks(#[from] BookmarkError),
}
