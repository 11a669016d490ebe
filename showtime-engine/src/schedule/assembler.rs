//! Schedule assembly.
//!
//! A page is processed in three steps:
//!
//! 1. The two period headers are parsed. Failure here aborts the build.
//! 2. Every row's footnotes are parsed into a shared [`FootnoteTable`], in
//!    row order, so a code resolves no matter which row printed it and the
//!    first row printing a code owns its rule.
//! 3. Every row is split into room, flags and time tokens and expanded into
//!    sessions. Problems in one row never affect another.
//!
//! Row expansion may be spread over several threads; output is always in row
//! order.

use std::thread;

use tracing::{debug, warn};

use crate::domain::{Cinema, Period, PeriodError, Session, SessionTemplate};
use crate::expand::expand_sessions;
use crate::footnote::{FootnoteCode, FootnoteError, FootnoteTable, InsertOutcome};
use crate::row::{RowError, split_room, tokenize_flags, tokenize_times};
use crate::source::{ListingRow, ListingSource};

use super::config::ScheduleConfig;
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::error::ScheduleError;
use super::model::{BuiltSchedule, Schedule};

/// Sessions and diagnostics produced by one row.
#[derive(Debug, Default)]
struct RowOutcome {
    sessions: Vec<Session>,
    diagnostics: Vec<Diagnostic>,
}

impl RowOutcome {
    fn push(&mut self, row: usize, kind: impl Into<DiagnosticKind>) {
        self.diagnostics.push(Diagnostic::new(row, kind));
    }
}

/// Build the schedule of one cinema from the raw fragments of its page.
///
/// `period_headers` must hold exactly the start and end of the week.
/// Problems confined to a row, footnote or time token are returned as
/// diagnostics next to whatever could still be built.
pub fn build_schedule<H: AsRef<str>>(
    cinema_id: u32,
    period_headers: &[H],
    rows: &[ListingRow],
    config: &ScheduleConfig,
) -> Result<BuiltSchedule, ScheduleError> {
    let period = parse_period(period_headers, config)?;
    debug!(
        cinema_id,
        start = %period.start(),
        end = %period.end(),
        rows = rows.len(),
        "Parsed listing period"
    );

    let footnotes = FootnoteTable::new();
    let mut diagnostics: Vec<Diagnostic> = rows
        .iter()
        .enumerate()
        .flat_map(|(index, row)| collect_footnotes(index, row, &footnotes, &period))
        .collect();
    debug!(footnotes = footnotes.len(), "Collected footnotes");

    let cinema = Cinema::new(cinema_id, config.time_zone);
    let outcomes = run_rows(rows, config.row_workers, |index, row| {
        assemble_row(index, row, &period, &footnotes, &cinema, config)
    });

    let mut sessions = Vec::new();
    for outcome in outcomes {
        sessions.extend(outcome.sessions);
        diagnostics.extend(outcome.diagnostics);
    }
    diagnostics.sort_by_key(|d| d.row);

    for diagnostic in &diagnostics {
        warn!(row = diagnostic.row, issue = %diagnostic.kind, "Skipped part of listing");
    }

    debug!(
        cinema_id,
        sessions = sessions.len(),
        diagnostics = diagnostics.len(),
        "Schedule built"
    );

    Ok(BuiltSchedule {
        schedule: Schedule {
            cinema,
            period,
            sessions,
        },
        diagnostics,
    })
}

/// Fetch a cinema's page from `source` and build its schedule.
pub fn fetch_schedule<S: ListingSource + ?Sized>(
    source: &S,
    cinema_id: u32,
    config: &ScheduleConfig,
) -> Result<BuiltSchedule, ScheduleError> {
    let page = source.fetch_page(cinema_id)?;
    let mut built = build_schedule(cinema_id, &page.period_headers, &page.rows, config)?;
    built.schedule.cinema.name = page.cinema_name;
    Ok(built)
}

fn parse_period<H: AsRef<str>>(
    headers: &[H],
    config: &ScheduleConfig,
) -> Result<Period, PeriodError> {
    let [start, end] = headers else {
        return Err(PeriodError::HeaderCount(headers.len()));
    };

    Period::parse(
        start.as_ref(),
        end.as_ref(),
        config.reference_year,
        config.time_zone,
    )
}

fn collect_footnotes(
    index: usize,
    row: &ListingRow,
    footnotes: &FootnoteTable,
    period: &Period,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for fragment in &row.footnotes {
        let code = match FootnoteCode::parse(&fragment.label) {
            Ok(code) => code,
            Err(e) => {
                diagnostics.push(Diagnostic::new(index, FootnoteError::from(e)));
                continue;
            }
        };

        match footnotes.insert(code, &fragment.hint, period) {
            Ok(InsertOutcome::Inserted { rejected_dates }) => {
                diagnostics.extend(rejected_dates.into_iter().map(|text| {
                    Diagnostic::new(index, DiagnosticKind::MalformedFootnoteDate { code, text })
                }));
            }
            Ok(InsertOutcome::AlreadyKnown) => {}
            Err(e) => diagnostics.push(Diagnostic::new(index, e)),
        }
    }

    diagnostics
}

fn assemble_row(
    index: usize,
    row: &ListingRow,
    period: &Period,
    footnotes: &FootnoteTable,
    cinema: &Cinema,
    config: &ScheduleConfig,
) -> RowOutcome {
    let mut outcome = RowOutcome::default();

    let title = row.title.trim();
    if title.is_empty() {
        outcome.push(index, RowError::MissingTitle);
        return outcome;
    }

    let (room, times) = match split_room(&row.schedule, &config.room_marker) {
        Ok(split) => split,
        Err(e) => {
            outcome.push(index, e);
            return outcome;
        }
    };

    let flags = tokenize_flags(&row.amenities);
    let template = SessionTemplate {
        cinema_id: cinema.id,
        movie_id: row.movie_id,
        movie_title: title.to_string(),
        room,
        format: flags.format,
        version: flags.version,
        amenities: flags.amenities,
    };

    let tokenized = tokenize_times(times);
    for e in tokenized.errors {
        outcome.push(index, e);
    }

    let expansion = expand_sessions(period, footnotes, &template, &tokenized.tokens);
    for token in expansion.unresolved {
        if let Some(code) = token.footnote {
            outcome.push(
                index,
                DiagnosticKind::UnresolvedFootnoteCode {
                    code,
                    hour: token.hour,
                    minute: token.minute,
                },
            );
        }
    }

    debug!(
        row = index,
        movie_id = row.movie_id,
        room,
        sessions = expansion.sessions.len(),
        "Expanded row"
    );
    outcome.sessions = expansion.sessions;
    outcome
}

/// Apply `f` to every row, in order.
///
/// With more than one worker the rows are cut into contiguous chunks, one
/// scoped thread per chunk, and the results are concatenated in chunk order.
fn run_rows<T, F>(rows: &[ListingRow], workers: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &ListingRow) -> T + Sync,
{
    if workers <= 1 || rows.len() <= 1 {
        return rows.iter().enumerate().map(|(i, row)| f(i, row)).collect();
    }

    let chunk_size = rows.len().div_ceil(workers);
    let f = &f;

    thread::scope(|s| {
        let handles: Vec<_> = rows
            .chunks(chunk_size)
            .enumerate()
            .map(|(n, chunk)| {
                let base = n * chunk_size;
                s.spawn(move || {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(i, row)| f(base + i, row))
                        .collect::<Vec<T>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Format, Version};
    use crate::source::{FixtureSource, FootnoteFragment, SourceError};
    use chrono::{NaiveDate, Timelike};

    fn config() -> ScheduleConfig {
        ScheduleConfig::default().with_reference_year(2024)
    }

    fn row(title: &str, movie_id: u32, schedule: &str) -> ListingRow {
        ListingRow {
            title: title.to_string(),
            movie_id,
            amenities: vec![],
            footnotes: vec![],
            schedule: schedule.to_string(),
        }
    }

    fn footnote(label: &str, hint: &str) -> FootnoteFragment {
        FootnoteFragment {
            label: label.to_string(),
            hint: hint.to_string(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    const HEADERS: [&str; 2] = ["01/03", "07/03"];

    #[test]
    fn end_to_end_week() {
        let mut r = row("Duna: Parte Dois", 42, "Sala 5 14h30, 19h00b");
        r.amenities = vec!["3D".into(), "LEG".into()];
        r.footnotes = vec![footnote("b", "Exceto Dom. (03/03)")];

        let built = build_schedule(656, &HEADERS, &[r], &config()).unwrap();
        let schedule = &built.schedule;

        assert!(built.diagnostics.is_empty());
        assert_eq!(schedule.len(), 13);
        assert_eq!(schedule.cinema.id, 656);
        assert_eq!(schedule.period.start(), date(1));
        assert_eq!(schedule.period.end(), date(7));

        // Every day has the 14h30 session
        for day in 1..=7 {
            assert!(
                schedule
                    .sessions_on(date(day))
                    .any(|s| s.starts_at.hour() == 14 && s.starts_at.minute() == 30)
            );
        }

        // 19h00 runs every day except Sunday the 3rd
        let evening: Vec<NaiveDate> = schedule
            .sessions
            .iter()
            .filter(|s| s.starts_at.hour() == 19)
            .map(|s| s.date())
            .collect();
        assert_eq!(evening.len(), 6);
        assert!(!evening.contains(&date(3)));

        let first = &schedule.sessions[0];
        assert_eq!(first.room, 5);
        assert_eq!(first.format, Format::ThreeD);
        assert_eq!(first.version, Some(Version::Subtitled));
        assert_eq!(first.movie_title, "Duna: Parte Dois");
    }

    #[test]
    fn sessions_keep_row_then_token_order() {
        let rows = vec![row("A", 1, "Sala 1 20h00, 10h00"), row("B", 2, "Sala 2 15h00")];

        let built = build_schedule(1, &HEADERS, &rows, &config()).unwrap();
        let sessions = &built.schedule.sessions;

        assert_eq!(sessions.len(), 21);
        assert!(sessions[..7].iter().all(|s| s.movie_id == 1 && s.starts_at.hour() == 20));
        assert!(sessions[7..14].iter().all(|s| s.movie_id == 1 && s.starts_at.hour() == 10));
        assert!(sessions[14..].iter().all(|s| s.movie_id == 2));
        assert_eq!(built.schedule.sessions_for_movie(2).count(), 7);
    }

    #[test]
    fn missing_room_skips_only_that_row() {
        let rows = vec![row("A", 1, "14h00"), row("B", 2, "Sala 3 14h00")];

        let built = build_schedule(1, &HEADERS, &rows, &config()).unwrap();

        assert_eq!(built.schedule.len(), 7);
        assert!(built.schedule.sessions.iter().all(|s| s.movie_id == 2));
        assert_eq!(
            built.diagnostics,
            vec![Diagnostic::new(0, RowError::MissingRoomNumber)]
        );
    }

    #[test]
    fn missing_title_is_reported() {
        let rows = [row("  ", 1, "Sala 1 14h00")];
        let built = build_schedule(1, &HEADERS, &rows, &config()).unwrap();

        assert!(built.schedule.is_empty());
        assert_eq!(
            built.diagnostics,
            vec![Diagnostic::new(0, RowError::MissingTitle)]
        );
    }

    #[test]
    fn bad_header_count_is_fatal() {
        let err = build_schedule(1, &["01/03"], &[], &config()).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::MalformedPeriod(PeriodError::HeaderCount(1))
        ));

        let err = build_schedule(1, &["01/03", "07/03", "08/03"], &[], &config()).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::MalformedPeriod(PeriodError::HeaderCount(3))
        ));
    }

    #[test]
    fn unparseable_header_is_fatal() {
        let err = build_schedule(1, &["01/03", "soon"], &[], &config()).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::MalformedPeriod(PeriodError::Header { which: "end", .. })
        ));
    }

    #[test]
    fn unknown_code_drops_only_its_token() {
        let rows = vec![row("A", 1, "Sala 1 14h00, 16h00z")];

        let built = build_schedule(1, &HEADERS, &rows, &config()).unwrap();

        assert_eq!(built.schedule.len(), 7);
        assert!(built.schedule.sessions.iter().all(|s| s.starts_at.hour() == 14));
        assert_eq!(
            built.diagnostics,
            vec![Diagnostic::new(
                0,
                DiagnosticKind::UnresolvedFootnoteCode {
                    code: FootnoteCode::new('z').unwrap(),
                    hour: 16,
                    minute: 0,
                }
            )]
        );
    }

    #[test]
    fn footnote_from_later_row_resolves() {
        let mut later = row("B", 2, "Sala 2 18h00");
        later.footnotes = vec![footnote("a", "Somente Sab. (02/03)")];
        let rows = vec![row("A", 1, "Sala 1 21h00a"), later];

        let built = build_schedule(1, &HEADERS, &rows, &config()).unwrap();

        assert!(built.diagnostics.is_empty());
        let first: Vec<_> = built.schedule.sessions_for_movie(1).collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].date(), date(2));
    }

    #[test]
    fn footnote_problems_are_diagnostics() {
        let mut r = row("A", 1, "Sala 1 14h00c, 15h00");
        r.footnotes = vec![
            footnote("c", "talvez Sab. (02/03)"),
            footnote("d", "Somente Sab. (31/02) Dom. (03/03)"),
        ];

        let built = build_schedule(1, &HEADERS, &[r], &config()).unwrap();
        let c = FootnoteCode::new('c').unwrap();
        let d = FootnoteCode::new('d').unwrap();

        assert_eq!(built.schedule.len(), 7);
        assert!(built.diagnostics.contains(&Diagnostic::new(
            0,
            FootnoteError::UnknownKind {
                code: c,
                keyword: "talvez".into()
            }
        )));
        assert!(built.diagnostics.contains(&Diagnostic::new(
            0,
            DiagnosticKind::MalformedFootnoteDate {
                code: d,
                text: "31/02".into()
            }
        )));
        assert!(built.diagnostics.contains(&Diagnostic::new(
            0,
            DiagnosticKind::UnresolvedFootnoteCode {
                code: c,
                hour: 14,
                minute: 0
            }
        )));
    }

    #[test]
    fn malformed_tokens_do_not_drop_the_row() {
        let rows = vec![row("A", 1, "Sala 1 14h00, 25h00, 16h00")];

        let built = build_schedule(1, &HEADERS, &rows, &config()).unwrap();

        assert_eq!(built.schedule.len(), 14);
        assert_eq!(built.diagnostics.len(), 1);
        assert!(matches!(
            built.diagnostics[0].kind,
            DiagnosticKind::Row(RowError::MalformedTimeToken { .. })
        ));
    }

    #[test]
    fn parallel_matches_sequential() {
        let rows: Vec<ListingRow> = (0..23)
            .map(|i| {
                let schedule = format!("Sala {} 1{}h00, 2{}h30b", i + 1, i % 10, i % 4);
                let mut r = row(&format!("Movie {i}"), i, &schedule);
                if i == 17 {
                    r.footnotes = vec![footnote("b", "Exceto Sab. (02/03) Dom. (03/03)")];
                }
                if i % 7 == 0 {
                    r.schedule = "no room".into();
                }
                r
            })
            .collect();

        let sequential = build_schedule(1, &HEADERS, &rows, &config()).unwrap();
        for workers in [2, 3, 8, 64] {
            let parallel =
                build_schedule(1, &HEADERS, &rows, &config().with_row_workers(workers)).unwrap();
            assert_eq!(parallel, sequential, "workers = {workers}");
        }
        assert!(!sequential.diagnostics.is_empty());
    }

    #[test]
    fn repeated_footnote_reports_bad_date_once() {
        let long_hint = format!("somente {} sab (31/02)", "dom (03/03) ".repeat(50));
        let rows: Vec<ListingRow> = (0..6)
            .map(|i| {
                let mut r = row(&format!("Movie {i}"), i, "Sala 1 20h00b");
                r.footnotes = vec![footnote("b", &long_hint)];
                r
            })
            .collect();

        let sequential = build_schedule(1, &HEADERS, &rows, &config()).unwrap();
        let b = FootnoteCode::new('b').unwrap();
        assert_eq!(
            sequential.diagnostics,
            vec![Diagnostic::new(
                0,
                DiagnosticKind::MalformedFootnoteDate {
                    code: b,
                    text: "31/02".into()
                }
            )]
        );

        for _ in 0..200 {
            let parallel =
                build_schedule(1, &HEADERS, &rows, &config().with_row_workers(3)).unwrap();
            assert_eq!(parallel, sequential);
        }
    }

    #[test]
    fn fetch_schedule_from_fixture() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("656.json"),
            r#"{
                "cinema_name": "Cine Centro",
                "period_headers": ["01/03", "07/03"],
                "rows": [
                    {
                        "title": "Duna",
                        "movie_id": 42,
                        "amenities": ["DUB"],
                        "footnotes": [{"label": "a", "hint": "Somente Sex. (01/03)"}],
                        "schedule": "Sala 2 13h00a"
                    }
                ]
            }"#,
        )
        .unwrap();

        let source = FixtureSource::new(dir.path());
        let built = fetch_schedule(&source, 656, &config()).unwrap();

        assert_eq!(built.schedule.cinema.name.as_deref(), Some("Cine Centro"));
        assert_eq!(built.schedule.len(), 1);
        assert_eq!(built.schedule.sessions[0].date(), date(1));
        assert_eq!(built.schedule.sessions[0].version, Some(Version::Dubbed));
    }

    #[test]
    fn fetch_schedule_missing_page() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixtureSource::new(dir.path());

        let err = fetch_schedule(&source, 1, &config()).unwrap_err();
        assert!(matches!(err, ScheduleError::Source(SourceError::NotFound(1))));
    }
}
