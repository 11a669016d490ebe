//! Page source error types.

use std::path::PathBuf;

/// Errors fetching a listing page.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No page exists for the cinema
    #[error("no listing page for cinema {0}")]
    NotFound(u32),

    /// Reading the page failed
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Page content is not valid JSON for a listing page
    #[error("failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
