//! Listing page sources.
//!
//! Fetching and DOM traversal live outside this crate; a source only has to
//! hand over the raw text fragments of a cinema's page.

mod error;
mod fixture;
mod page;

pub use error::SourceError;
pub use fixture::FixtureSource;
pub use page::{FootnoteFragment, ListingPage, ListingRow};

/// Trait for providing listing pages.
///
/// This abstraction allows schedules to be built from live pages or from
/// recorded fixtures.
pub trait ListingSource {
    /// Fetch the raw fragments of a cinema's listing page.
    fn fetch_page(&self, cinema_id: u32) -> Result<ListingPage, SourceError>;
}
