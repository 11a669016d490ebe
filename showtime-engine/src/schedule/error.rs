//! Schedule building errors.

use crate::domain::PeriodError;
use crate::source::SourceError;

/// Errors that abort building a schedule.
///
/// Everything else is recorded as a [`Diagnostic`](super::Diagnostic) next
/// to a best-effort schedule.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Without a valid period no session can be placed in time
    #[error("malformed period: {0}")]
    MalformedPeriod(#[from] PeriodError),

    /// The listing page itself could not be fetched
    #[error("failed to fetch listing page: {0}")]
    Source(#[from] SourceError),
}
