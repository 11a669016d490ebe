//! Recoverable problems met while building a schedule.

use crate::footnote::{FootnoteCode, FootnoteError};
use crate::row::RowError;

/// What went wrong in a listing row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticKind {
    /// A footnote could not be parsed; tokens referring to it are dropped
    #[error(transparent)]
    Footnote(#[from] FootnoteError),

    /// A footnote listed a date that does not exist; the date is ignored
    #[error("footnote {code}: invalid date {text:?}")]
    MalformedFootnoteDate { code: FootnoteCode, text: String },

    /// The row, or one of its time tokens, could not be read
    #[error(transparent)]
    Row(#[from] RowError),

    /// A time token names a footnote that is not in the table
    #[error("showtime {hour:02}h{minute:02} refers to unknown footnote {code}")]
    UnresolvedFootnoteCode {
        code: FootnoteCode,
        hour: u32,
        minute: u32,
    },
}

/// A recoverable problem, tagged with the listing row it came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row {row}: {kind}")]
pub struct Diagnostic {
    /// Zero-based index of the listing row
    pub row: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(row: usize, kind: impl Into<DiagnosticKind>) -> Self {
        Self {
            row,
            kind: kind.into(),
        }
    }
}
