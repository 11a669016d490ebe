//! Footnote annotations on showtimes.
//!
//! A listing row may mark a showtime with a letter ("19h00b") that points
//! to a footnote saying the time runs only on certain dates, or on every
//! day except certain dates. This module parses those footnotes and keeps
//! them in a table shared by all rows of a page.

mod code;
mod error;
mod rule;
mod table;

pub use code::{FootnoteCode, InvalidFootnoteCode};
pub use error::FootnoteError;
pub use rule::{FootnoteKind, FootnoteRule, ParsedHint};
pub use table::{FootnoteTable, InsertOutcome};
