//! Listing row errors.

/// Problems found while tokenizing a listing row.
///
/// A missing title or room drops the whole row; a bad time token drops only
/// that token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    /// Row has no movie title
    #[error("missing movie title")]
    MissingTitle,

    /// Row text does not start with the room marker and a room number
    #[error("missing room number")]
    MissingRoomNumber,

    /// Room marker is followed by something that is not a number
    #[error("invalid room number {0:?}")]
    MalformedRoomNumber(String),

    /// A comma-separated time piece is not "HHhMM" with an optional letter
    #[error("invalid time token {token:?}: {reason}")]
    MalformedTimeToken { token: String, reason: &'static str },
}
