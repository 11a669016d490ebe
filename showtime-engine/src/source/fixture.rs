//! Listing pages served from JSON files on disk.
//!
//! Useful for development and tests without fetching live pages.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ListingSource;
use super::error::SourceError;
use super::page::ListingPage;

/// Source that reads `{cinema_id}.json` files from a directory.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    dir: PathBuf,
}

impl FixtureSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory pages are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn page_path(&self, cinema_id: u32) -> PathBuf {
        self.dir.join(format!("{cinema_id}.json"))
    }
}

impl ListingSource for FixtureSource {
    fn fetch_page(&self, cinema_id: u32) -> Result<ListingPage, SourceError> {
        let path = self.page_path(cinema_id);

        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::NotFound(cinema_id));
            }
            Err(source) => return Err(SourceError::Io { path, source }),
        };

        let page: ListingPage =
            serde_json::from_str(&json).map_err(|source| SourceError::Json {
                path: path.clone(),
                source,
            })?;

        debug!(cinema_id, rows = page.rows.len(), path = ?path, "Loaded listing page");
        Ok(page)
    }
}
