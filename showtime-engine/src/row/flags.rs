//! Amenity markers: format, version and room features.

use crate::domain::{Amenities, Format, Version};

/// What a single marker keyword sets.
#[derive(Debug, Clone, Copy)]
enum Marker {
    Version(Version),
    Format(Format),
    Vip,
    Xd,
    Imax,
}

/// Keywords searched for in each lower-cased marker, in priority order.
const MARKER_KEYWORDS: [(&str, Marker); 8] = [
    ("dub", Marker::Version(Version::Dubbed)),
    ("leg", Marker::Version(Version::Subtitled)),
    ("nac", Marker::Version(Version::National)),
    ("3d", Marker::Format(Format::ThreeD)),
    ("4dx", Marker::Format(Format::FourDx)),
    ("vip", Marker::Vip),
    ("xd", Marker::Xd),
    ("imax", Marker::Imax),
];

/// Flags collected from a row's amenity markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowFlags {
    pub format: Format,
    pub version: Option<Version>,
    pub amenities: Amenities,
}

/// Read a row's amenity markers (icon hint texts) into flags.
///
/// Each marker applies the first keyword it contains; markers matching
/// nothing are ignored. When two markers set the same field the later one
/// wins.
///
/// # Examples
///
/// ```
/// use showtime_engine::domain::{Format, Version};
/// use showtime_engine::row::tokenize_flags;
///
/// let flags = tokenize_flags(["Legendado", "Sala 3D", "Sala VIP"]);
/// assert_eq!(flags.version, Some(Version::Subtitled));
/// assert_eq!(flags.format, Format::ThreeD);
/// assert!(flags.amenities.vip);
/// ```
pub fn tokenize_flags<I>(markers: I) -> RowFlags
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut flags = RowFlags::default();

    for marker in markers {
        let marker = marker.as_ref().to_lowercase();
        let Some((_, found)) = MARKER_KEYWORDS
            .iter()
            .find(|(keyword, _)| marker.contains(*keyword))
        else {
            continue;
        };

        match *found {
            Marker::Version(v) => flags.version = Some(v),
            Marker::Format(f) => flags.format = f,
            Marker::Vip => flags.amenities.vip = true,
            Marker::Xd => flags.amenities.xd = true,
            Marker::Imax => flags.amenities.imax = true,
        }
    }

    flags
}
