//! The assembled schedule.

use chrono::NaiveDate;

use crate::domain::{Cinema, Period, Session};

use super::diagnostic::Diagnostic;

/// All sessions of one cinema over one period, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub cinema: Cinema,
    pub period: Period,
    pub sessions: Vec<Session>,
}

impl Schedule {
    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the schedule has no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions starting on `date` (local time), in listing order.
    pub fn sessions_on(&self, date: NaiveDate) -> impl Iterator<Item = &Session> {
        self.sessions.iter().filter(move |s| s.date() == date)
    }

    /// Sessions of one movie, in listing order.
    pub fn sessions_for_movie(&self, movie_id: u32) -> impl Iterator<Item = &Session> {
        self.sessions.iter().filter(move |s| s.movie_id == movie_id)
    }
}

/// A schedule together with the problems skipped while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltSchedule {
    pub schedule: Schedule,
    pub diagnostics: Vec<Diagnostic>,
}
