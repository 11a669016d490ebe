//! Schedule building configuration.

use chrono_tz::Tz;
use tracing::warn;

/// Zone used when none is configured: the listing site's home zone.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Sao_Paulo;

/// Word that introduces the room number in a row's schedule text.
pub const DEFAULT_ROOM_MARKER: &str = "Sala";

/// Configuration parameters for building a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Zone all dates and session times are placed in.
    pub time_zone: Tz,

    /// Year given to dates printed without one.
    /// `None` uses the current year in `time_zone`.
    pub reference_year: Option<i32>,

    /// Number of threads listing rows are split across.
    /// 1 processes rows on the calling thread.
    pub row_workers: usize,

    /// Word that must open a row's schedule text, before the room number.
    pub room_marker: String,
}

impl ScheduleConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        time_zone: Tz,
        reference_year: Option<i32>,
        row_workers: usize,
        room_marker: impl Into<String>,
    ) -> Self {
        Self {
            time_zone,
            reference_year,
            row_workers: row_workers.max(1),
            room_marker: room_marker.into(),
        }
    }

    /// Set the zone.
    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Fix the year used for dates printed without one.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Set the number of row worker threads (at least 1).
    pub fn with_row_workers(mut self, workers: usize) -> Self {
        self.row_workers = workers.max(1);
        self
    }

    /// Read overrides from the process environment.
    ///
    /// See [`ScheduleConfig::from_lookup`] for the variables read.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from `SHOWTIME_TZ`, `SHOWTIME_YEAR`, `SHOWTIME_WORKERS`
    /// and `SHOWTIME_ROOM_MARKER` as returned by `lookup`.
    ///
    /// Unset variables keep their defaults; invalid ones are logged and
    /// ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(tz) = lookup("SHOWTIME_TZ") {
            match tz.parse::<Tz>() {
                Ok(zone) => config.time_zone = zone,
                Err(_) => warn!(value = %tz, "Ignoring unknown SHOWTIME_TZ"),
            }
        }

        if let Some(year) = lookup("SHOWTIME_YEAR") {
            match year.trim().parse::<i32>() {
                Ok(year) => config.reference_year = Some(year),
                Err(e) => warn!(value = %year, error = %e, "Ignoring invalid SHOWTIME_YEAR"),
            }
        }

        if let Some(workers) = lookup("SHOWTIME_WORKERS") {
            match workers.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.row_workers = n,
                _ => warn!(value = %workers, "Ignoring invalid SHOWTIME_WORKERS"),
            }
        }

        if let Some(marker) = lookup("SHOWTIME_ROOM_MARKER") {
            let marker = marker.trim();
            if marker.is_empty() {
                warn!("Ignoring empty SHOWTIME_ROOM_MARKER");
            } else {
                config.room_marker = marker.to_string();
            }
        }

        config
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE,
            reference_year: None,
            row_workers: 1,
            room_marker: DEFAULT_ROOM_MARKER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = ScheduleConfig::default();

        assert_eq!(config.time_zone, chrono_tz::America::Sao_Paulo);
        assert_eq!(config.reference_year, None);
        assert_eq!(config.row_workers, 1);
        assert_eq!(config.room_marker, "Sala");
    }

    #[test]
    fn custom_config() {
        let config = ScheduleConfig::new(chrono_tz::America::Manaus, Some(2024), 0, "Room");

        assert_eq!(config.time_zone, chrono_tz::America::Manaus);
        assert_eq!(config.reference_year, Some(2024));
        // Zero workers is clamped to one
        assert_eq!(config.row_workers, 1);
        assert_eq!(config.room_marker, "Room");
    }

    #[test]
    fn builder_setters() {
        let config = ScheduleConfig::default()
            .with_time_zone(chrono_tz::America::Recife)
            .with_reference_year(2025)
            .with_row_workers(4);

        assert_eq!(config.time_zone, chrono_tz::America::Recife);
        assert_eq!(config.reference_year, Some(2025));
        assert_eq!(config.row_workers, 4);
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let config = ScheduleConfig::from_lookup(lookup(&[
            ("SHOWTIME_TZ", "America/Rio_Branco"),
            ("SHOWTIME_YEAR", "2024"),
            ("SHOWTIME_WORKERS", "3"),
            ("SHOWTIME_ROOM_MARKER", "Room"),
        ]));

        assert_eq!(config.time_zone, chrono_tz::America::Rio_Branco);
        assert_eq!(config.reference_year, Some(2024));
        assert_eq!(config.row_workers, 3);
        assert_eq!(config.room_marker, "Room");
    }

    #[test]
    fn from_lookup_ignores_invalid_values() {
        let config = ScheduleConfig::from_lookup(lookup(&[
            ("SHOWTIME_TZ", "Mars/Olympus_Mons"),
            ("SHOWTIME_YEAR", "next"),
            ("SHOWTIME_WORKERS", "0"),
            ("SHOWTIME_ROOM_MARKER", "  "),
        ]));

        assert_eq!(config, ScheduleConfig::default());
    }
}
