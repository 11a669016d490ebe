//! Session expansion.
//!
//! Places each showtime token of a row on concrete dates and stamps the
//! row's template with the resulting start times:
//!
//! - a token without a footnote runs on each of the seven days of the period,
//! - an "only" footnote restricts it to the listed dates (taken as-is, even
//!   outside the period),
//! - an "except" footnote runs it every day of the period whose day and
//!   month are not listed.
//!
//! Tokens whose footnote is missing from the table produce nothing and are
//! reported back to the caller. Output order is token order, then day order.

use chrono::NaiveDate;
use tracing::trace;

use crate::domain::{Period, Session, SessionTemplate, combine_date_time};
use crate::footnote::{FootnoteKind, FootnoteTable};
use crate::row::RawTimeToken;

/// Sessions produced from one row, plus the tokens that could not be placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub sessions: Vec<Session>,
    /// Tokens whose footnote code had no rule in the table
    pub unresolved: Vec<RawTimeToken>,
}

/// Expand a row's time tokens into sessions.
pub fn expand_sessions(
    period: &Period,
    footnotes: &FootnoteTable,
    template: &SessionTemplate,
    tokens: &[RawTimeToken],
) -> Expansion {
    let mut expansion = Expansion::default();

    for token in tokens {
        let Some(dates) = token_dates(period, footnotes, token) else {
            expansion.unresolved.push(*token);
            continue;
        };

        trace!(
            hour = token.hour,
            minute = token.minute,
            days = dates.len(),
            "Expanding showtime"
        );

        for date in dates {
            match combine_date_time(date, token.hour, token.minute, period.time_zone()) {
                Some(starts_at) => expansion.sessions.push(template.at(starts_at)),
                None => trace!(%date, "start time out of range, skipping"),
            }
        }
    }

    expansion
}

/// The dates a token runs on, or `None` if its footnote is unknown.
fn token_dates(
    period: &Period,
    footnotes: &FootnoteTable,
    token: &RawTimeToken,
) -> Option<Vec<NaiveDate>> {
    let Some(code) = token.footnote else {
        return Some(period.days().collect());
    };

    let rule = footnotes.resolve(code)?;
    let dates = match rule.kind {
        FootnoteKind::Only => rule.days.clone(),
        FootnoteKind::Except => period
            .days()
            .filter(|d| !rule.lists_day_month(*d))
            .collect(),
    };
    Some(dates)
}
