//! Footnote parsing errors.

use super::code::{FootnoteCode, InvalidFootnoteCode};

/// Errors turning a footnote label/hint pair into a rule.
///
/// None of these abort a schedule: the footnote is left out of the table
/// and any time token that refers to it is dropped later.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FootnoteError {
    /// Label is not a single letter
    #[error(transparent)]
    InvalidLabel(#[from] InvalidFootnoteCode),

    /// The footnote carries no hint text to parse
    #[error("footnote {0}: missing hint")]
    MissingHint(FootnoteCode),

    /// Hint starts with neither "somente" nor "exceto"
    #[error("footnote {code}: unknown kind {keyword:?}")]
    UnknownKind { code: FootnoteCode, keyword: String },
}
