//! Session records: what is shown, where, and when.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Weekday};
use chrono_tz::Tz;

/// Projection format of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    TwoD,
    ThreeD,
    FourDx,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::TwoD => "2D",
            Format::ThreeD => "3D",
            Format::FourDx => "4DX",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audio/subtitle version of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    Dubbed,
    Subtitled,
    /// Domestic production, shown in its original language
    National,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Dubbed => "dubbed",
            Version::Subtitled => "subtitled",
            Version::National => "national",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room amenities advertised next to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Amenities {
    pub vip: bool,
    /// Extra-large screen format
    pub xd: bool,
    pub imax: bool,
}

/// The cinema a schedule belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cinema {
    pub id: u32,
    pub name: Option<String>,
    pub time_zone: Tz,
}

impl Cinema {
    pub fn new(id: u32, time_zone: Tz) -> Self {
        Self {
            id,
            name: None,
            time_zone,
        }
    }
}

/// Everything a listing row says about its sessions except the start times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTemplate {
    pub cinema_id: u32,
    pub movie_id: u32,
    pub movie_title: String,
    pub room: u32,
    pub format: Format,
    pub version: Option<Version>,
    pub amenities: Amenities,
}

impl SessionTemplate {
    /// Stamp this template with a concrete start time.
    pub fn at(&self, starts_at: DateTime<Tz>) -> Session {
        Session {
            cinema_id: self.cinema_id,
            movie_id: self.movie_id,
            movie_title: self.movie_title.clone(),
            room: self.room,
            format: self.format,
            version: self.version,
            amenities: self.amenities,
            starts_at,
        }
    }
}

/// A single showing of a movie at an absolute point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub cinema_id: u32,
    pub movie_id: u32,
    pub movie_title: String,
    pub room: u32,
    pub format: Format,
    pub version: Option<Version>,
    pub amenities: Amenities,
    pub starts_at: DateTime<Tz>,
}

impl Session {
    /// Local calendar date of the showing.
    pub fn date(&self) -> NaiveDate {
        self.starts_at.date_naive()
    }

    /// Local day of the week of the showing.
    pub fn weekday(&self) -> Weekday {
        self.starts_at.weekday()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | room {} | {} | {}",
            self.starts_at.format("%Y-%m-%d %H:%M"),
            self.room,
            self.movie_title,
            self.format
        )?;
        if let Some(version) = self.version {
            write!(f, " {version}")?;
        }
        if self.amenities.vip {
            f.write_str(" VIP")?;
        }
        if self.amenities.xd {
            f.write_str(" XD")?;
        }
        if self.amenities.imax {
            f.write_str(" IMAX")?;
        }
        Ok(())
    }
}
