//! Listing row tokenizer.
//!
//! Turns the raw text fragments of one listing row into typed pieces: the
//! room number, format/version/amenity flags, and the ordered showtime
//! tokens still waiting to be placed on dates.

mod error;
mod flags;
mod times;

pub use error::RowError;
pub use flags::{RowFlags, tokenize_flags};
pub use times::{RawTimeToken, TokenizedTimes, split_room, tokenize_times};
