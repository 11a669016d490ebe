//! Schedule assembly: from a listing page to a list of sessions.

mod assembler;
mod config;
mod diagnostic;
mod error;
mod model;

pub use assembler::{build_schedule, fetch_schedule};
pub use config::{DEFAULT_ROOM_MARKER, DEFAULT_TIME_ZONE, ScheduleConfig};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::ScheduleError;
pub use model::{BuiltSchedule, Schedule};
