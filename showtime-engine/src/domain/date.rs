//! Calendar date handling for listing pages.
//!
//! Listing pages print dates as "DD/MM" or "DD/MM/YYYY" strings and times as
//! hour/minute pairs, always in the cinema's local time zone. This module
//! turns those into `NaiveDate`s and zoned timestamps.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Error returned when a date string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {text:?}: {reason}")]
pub struct DateError {
    text: String,
    reason: &'static str,
}

impl DateError {
    fn new(text: &str, reason: &'static str) -> Self {
        Self {
            text: text.to_string(),
            reason,
        }
    }

    pub(crate) fn impossible(text: &str) -> Self {
        Self::new(text.trim(), "no such calendar date")
    }

    /// The text that failed to parse.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The numeric components of a "DD/MM[/YYYY]" string.
///
/// Kept separate from a resolved `NaiveDate` so callers can tell whether the
/// year was printed or has to be inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMonth {
    pub day: u32,
    pub month: u32,
    pub year: Option<i32>,
}

impl DayMonth {
    /// Split a date string on `/` into day, month and optional year.
    ///
    /// # Examples
    ///
    /// ```
    /// use showtime_engine::domain::DayMonth;
    ///
    /// let dm = DayMonth::parse("25/12").unwrap();
    /// assert_eq!((dm.day, dm.month, dm.year), (25, 12, None));
    ///
    /// let dm = DayMonth::parse("01/03/2024").unwrap();
    /// assert_eq!(dm.year, Some(2024));
    ///
    /// assert!(DayMonth::parse("25").is_err());
    /// assert!(DayMonth::parse("aa/12").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, DateError> {
        let trimmed = text.trim();
        let parts: Vec<&str> = trimmed.split('/').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(DateError::new(trimmed, "expected DD/MM or DD/MM/YYYY"));
        }

        let day = parse_digits(parts[0]).ok_or_else(|| DateError::new(trimmed, "invalid day"))?;
        let month =
            parse_digits(parts[1]).ok_or_else(|| DateError::new(trimmed, "invalid month"))?;
        let year = match parts.get(2) {
            Some(y) => {
                let y = parse_digits(y).ok_or_else(|| DateError::new(trimmed, "invalid year"))?;
                Some(i32::try_from(y).map_err(|_| DateError::new(trimmed, "invalid year"))?)
            }
            None => None,
        };

        Ok(Self { day, month, year })
    }

    /// Resolve to a calendar date, using `fallback_year` if none was printed.
    pub fn with_fallback_year(&self, fallback_year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year.unwrap_or(fallback_year), self.month, self.day)
    }
}

/// Parse a non-empty run of ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// The current calendar year as seen from `zone`.
pub fn current_year(zone: Tz) -> i32 {
    Utc::now().with_timezone(&zone).year()
}

/// Parse a "DD/MM" or "DD/MM/YYYY" string into a calendar date.
///
/// If the year is omitted, `reference_year` is used, falling back to the
/// current year in `zone` when that is `None` too.
///
/// # Examples
///
/// ```
/// use showtime_engine::domain::parse_day_month;
/// use chrono::NaiveDate;
///
/// let zone = chrono_tz::America::Sao_Paulo;
/// let date = parse_day_month("25/12", Some(2024), zone).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
///
/// // A printed year wins over the reference year
/// let date = parse_day_month("25/12/2023", Some(2024), zone).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2023, 12, 25).unwrap());
/// ```
pub fn parse_day_month(
    text: &str,
    reference_year: Option<i32>,
    zone: Tz,
) -> Result<NaiveDate, DateError> {
    let dm = DayMonth::parse(text)?;
    let year = reference_year.unwrap_or_else(|| current_year(zone));
    dm.with_fallback_year(year)
        .ok_or_else(|| DateError::impossible(text))
}

/// Add `hours` and `minutes` to local midnight of `date` in `zone`.
///
/// Out-of-range values roll over into later days (25h00 is 01:00 the next
/// day). Returns `None` only if the result leaves chrono's date range.
///
/// # Examples
///
/// ```
/// use showtime_engine::domain::combine_date_time;
/// use chrono::{NaiveDate, Timelike};
///
/// let zone = chrono_tz::America::Sao_Paulo;
/// let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
/// let ts = combine_date_time(date, 20, 30, zone).unwrap();
/// assert_eq!((ts.hour(), ts.minute()), (20, 30));
/// assert_eq!(ts.date_naive(), date);
/// ```
pub fn combine_date_time(
    date: NaiveDate,
    hours: u32,
    minutes: u32,
    zone: Tz,
) -> Option<DateTime<Tz>> {
    let naive = date
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::hours(i64::from(hours)))?
        .checked_add_signed(Duration::minutes(i64::from(minutes)))?;
    Some(localize(zone, naive))
}

/// Attach `zone` to a local wall-clock time.
///
/// Times inside a DST gap move forward one hour; ambiguous times take the
/// earlier instant.
fn localize(zone: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = zone.from_local_datetime(&naive).earliest() {
        return dt;
    }
    naive
        .checked_add_signed(Duration::hours(1))
        .and_then(|shifted| zone.from_local_datetime(&shifted).earliest())
        .unwrap_or_else(|| zone.from_utc_datetime(&naive))
}
