//! Footnote rules: which days a footnoted showtime actually runs.

use chrono::{Datelike, NaiveDate};
use tracing::trace;

use crate::domain::{DayMonth, Period};

use super::code::FootnoteCode;
use super::error::FootnoteError;

/// Keyword that marks an "only on these dates" footnote.
const ONLY_KEYWORD: &str = "somente";

/// Keyword that marks an "every day except these dates" footnote.
const EXCEPT_KEYWORD: &str = "exceto";

/// How a footnote restricts the days of a showtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FootnoteKind {
    /// The showtime runs on the listed dates only
    Only,
    /// The showtime runs every day of the period except the listed dates
    Except,
}

/// A parsed footnote: its kind and the dates it lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteRule {
    pub kind: FootnoteKind,
    pub days: Vec<NaiveDate>,
}

/// Result of parsing a footnote hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHint {
    pub rule: FootnoteRule,
    /// Date tokens shaped like "(DD/MM)" that name no real calendar day
    pub rejected_dates: Vec<String>,
}

impl FootnoteRule {
    /// Parse a footnote hint such as `"Exceto Dom. (03/03)"`.
    ///
    /// The first word picks the kind. The rest is read as pairs of weekday
    /// name and parenthesised date; pairs whose date does not look like
    /// "(DD/MM)" are skipped. Dates get their year from `period`.
    ///
    /// # Examples
    ///
    /// ```
    /// use showtime_engine::domain::Period;
    /// use showtime_engine::footnote::{FootnoteCode, FootnoteKind, FootnoteRule};
    /// use chrono::NaiveDate;
    ///
    /// let period = Period::parse("01/03", "07/03", Some(2024), chrono_tz::UTC).unwrap();
    /// let code = FootnoteCode::new('b').unwrap();
    ///
    /// let hint = "Somente Sab. (02/03) Dom. (03/03)";
    /// let parsed = FootnoteRule::parse(code, hint, &period).unwrap();
    /// assert_eq!(parsed.rule.kind, FootnoteKind::Only);
    /// assert_eq!(parsed.rule.days, vec![
    ///     NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
    /// ]);
    /// ```
    pub fn parse(
        code: FootnoteCode,
        hint: &str,
        period: &Period,
    ) -> Result<ParsedHint, FootnoteError> {
        let hint = hint.trim().to_lowercase();
        if hint.is_empty() {
            return Err(FootnoteError::MissingHint(code));
        }

        let (keyword, remainder) = hint
            .split_once(char::is_whitespace)
            .unwrap_or((hint.as_str(), ""));
        let kind = if keyword.contains(ONLY_KEYWORD) {
            FootnoteKind::Only
        } else if keyword.contains(EXCEPT_KEYWORD) {
            FootnoteKind::Except
        } else {
            return Err(FootnoteError::UnknownKind {
                code,
                keyword: keyword.to_string(),
            });
        };

        let remainder = remainder.replace('.', " ");
        let mut words = remainder.split_whitespace();
        let mut days = Vec::new();
        let mut rejected_dates = Vec::new();

        while let (Some(weekday), Some(token)) = (words.next(), words.next()) {
            let Some(inner) = parenthesised_date(token) else {
                trace!(%code, weekday, token, "skipping footnote pair without a date");
                continue;
            };

            let resolved = DayMonth::parse(inner)
                .ok()
                .and_then(|dm| dm.with_fallback_year(period.year_for(dm.day, dm.month)));
            match resolved {
                Some(date) => days.push(date),
                None => rejected_dates.push(inner.to_string()),
            }
        }

        Ok(ParsedHint {
            rule: FootnoteRule { kind, days },
            rejected_dates,
        })
    }

    /// Whether `date` is one of the listed days, comparing day and month only.
    ///
    /// Year is ignored so that a week crossing New Year still matches dates
    /// printed without one.
    pub fn lists_day_month(&self, date: NaiveDate) -> bool {
        self.days
            .iter()
            .any(|d| d.day() == date.day() && d.month() == date.month())
    }
}

/// Find a "(DD/MM)" group inside `token` and return the "DD/MM" part.
fn parenthesised_date(token: &str) -> Option<&str> {
    let open = token.find('(')?;
    let inner = token.get(open + 1..open + 6)?;
    if token.get(open + 6..open + 7)? != ")" {
        return None;
    }

    let bytes = inner.as_bytes();
    let shaped = bytes[2] == b'/' && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    shaped.then_some(inner)
}
