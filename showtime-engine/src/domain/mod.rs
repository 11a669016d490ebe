//! Domain types for cinema schedules.
//!
//! This module contains the validated building blocks every other layer
//! works with: calendar dates as printed on listing pages, the weekly
//! period, and session records. Types enforce their invariants at
//! construction time.

mod date;
mod period;
mod session;

pub use date::{DateError, DayMonth, combine_date_time, current_year, parse_day_month};
pub use period::{DAYS_IN_WEEK, Period, PeriodError};
pub use session::{Amenities, Cinema, Format, Session, SessionTemplate, Version};
