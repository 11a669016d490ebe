//! Cinema showtime engine.
//!
//! Turns the text fragments of a weekly cinema listing page (period
//! headers, footnotes and per-movie rows such as "Sala 5 14h30, 19h00b")
//! into a flat list of zoned sessions.

pub mod domain;
pub mod expand;
pub mod footnote;
pub mod row;
pub mod schedule;
pub mod source;
