//! The weekly window a listing page covers.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use super::date::{DateError, DayMonth, current_year};

/// Number of days a theatrical week spans.
pub const DAYS_IN_WEEK: usize = 7;

/// Error building a `Period` from header strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    /// The page did not carry exactly two header dates
    #[error("expected 2 period headers, found {0}")]
    HeaderCount(usize),

    /// One of the header dates failed to parse
    #[error("{which} header: {source}")]
    Header {
        which: &'static str,
        #[source]
        source: DateError,
    },

    /// Start date falls after end date
    #[error("period starts {start} but ends {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

/// A theatrical week: the dates a schedule covers, in the cinema's zone.
///
/// Invariant: `start <= end`, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
    time_zone: Tz,
}

impl Period {
    /// Create a period from already-resolved dates.
    pub fn new(start: NaiveDate, end: NaiveDate, time_zone: Tz) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::Reversed { start, end });
        }
        Ok(Self {
            start,
            end,
            time_zone,
        })
    }

    /// Parse the two header date strings of a listing page.
    ///
    /// When neither header prints a year and the end would precede the start
    /// (a week spanning New Year), the end moves into the following year.
    ///
    /// # Examples
    ///
    /// ```
    /// use showtime_engine::domain::Period;
    /// use chrono::NaiveDate;
    ///
    /// let zone = chrono_tz::America::Sao_Paulo;
    /// let period = Period::parse("28/12", "03/01", Some(2024), zone).unwrap();
    /// assert_eq!(period.start(), NaiveDate::from_ymd_opt(2024, 12, 28).unwrap());
    /// assert_eq!(period.end(), NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
    /// ```
    pub fn parse(
        start_text: &str,
        end_text: &str,
        reference_year: Option<i32>,
        time_zone: Tz,
    ) -> Result<Self, PeriodError> {
        let start_dm = DayMonth::parse(start_text).map_err(|source| PeriodError::Header {
            which: "start",
            source,
        })?;
        let end_dm = DayMonth::parse(end_text).map_err(|source| PeriodError::Header {
            which: "end",
            source,
        })?;

        let year = reference_year.unwrap_or_else(|| current_year(time_zone));
        let start = resolve(&start_dm, year, start_text, "start")?;
        let mut end = resolve(&end_dm, end_dm.year.unwrap_or(start.year()), end_text, "end")?;

        if end < start
            && end_dm.year.is_none()
            && let Some(next) = end_dm.with_fallback_year(start.year() + 1)
        {
            end = next;
        }

        Self::new(start, end, time_zone)
    }

    /// First day of the week.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the week.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Zone every session of this period is placed in.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// The seven consecutive days starting at `start`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(DAYS_IN_WEEK)
    }

    /// Whether `date` lies within `start..=end`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Year to give a footnote date that was printed without one.
    ///
    /// Uses the start's year, unless that would put the date before the
    /// period and the period runs into the next year.
    pub fn year_for(&self, day: u32, month: u32) -> i32 {
        let year = self.start.year();
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) if date < self.start && self.end.year() > year => self.end.year(),
            _ => year,
        }
    }
}

fn resolve(
    dm: &DayMonth,
    year: i32,
    text: &str,
    which: &'static str,
) -> Result<NaiveDate, PeriodError> {
    dm.with_fallback_year(year)
        .ok_or_else(|| PeriodError::Header {
            which,
            source: DateError::impossible(text),
        })
}
