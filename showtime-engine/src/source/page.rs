//! Raw text fragments of a listing page.
//!
//! These are the strings a page-fetch/DOM layer extracts from a cinema's
//! listing page. Nothing here is interpreted yet.

use serde::Deserialize;

/// Everything extracted from one cinema's listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingPage {
    /// Cinema name as shown in the page header
    #[serde(default)]
    pub cinema_name: Option<String>,

    /// Date-bearing header fragments; a well-formed page has exactly two
    #[serde(default)]
    pub period_headers: Vec<String>,

    /// One entry per movie listing
    #[serde(default)]
    pub rows: Vec<ListingRow>,
}

/// Fragments of a single movie listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingRow {
    pub title: String,

    /// Movie id already resolved from the listing link
    pub movie_id: u32,

    /// Icon hint texts ("Dublado", "3D", "Sala VIP", ...)
    #[serde(default)]
    pub amenities: Vec<String>,

    /// Footnotes attached to the row's showtimes
    #[serde(default)]
    pub footnotes: Vec<FootnoteFragment>,

    /// Room marker and time list, e.g. "Sala 5 14h30, 19h00b"
    pub schedule: String,
}

/// A footnote label with its hint text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FootnoteFragment {
    pub label: String,
    #[serde(default)]
    pub hint: String,
}
