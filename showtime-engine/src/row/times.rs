//! Room marker and showtime tokens of a listing row.
//!
//! The schedule text of a row reads like `"Sala 5 14h30, 19h00b"`: the room
//! marker and number, then comma-separated times, each optionally followed
//! by a footnote letter.

use crate::footnote::FootnoteCode;

use super::error::RowError;

/// A showtime as printed, before it is placed on any date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTimeToken {
    pub hour: u32,
    pub minute: u32,
    /// Footnote restricting the days this time runs, if any
    pub footnote: Option<FootnoteCode>,
}

impl RawTimeToken {
    /// Parse one comma-separated piece such as `"19h00"` or `"19h00b"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use showtime_engine::row::RawTimeToken;
    ///
    /// let token = RawTimeToken::parse("19h00b").unwrap();
    /// assert_eq!((token.hour, token.minute), (19, 0));
    /// assert_eq!(token.footnote.unwrap().as_char(), 'b');
    ///
    /// assert!(RawTimeToken::parse("19:00").is_err());
    /// assert!(RawTimeToken::parse("h30").is_err());
    /// ```
    pub fn parse(piece: &str) -> Result<Self, RowError> {
        let piece = piece.trim();
        let malformed = |reason| RowError::MalformedTimeToken {
            token: piece.to_string(),
            reason,
        };

        let (time, footnote) = match piece.chars().next_back() {
            Some(last) if last.is_alphabetic() => {
                (&piece[..piece.len() - last.len_utf8()], FootnoteCode::new(last))
            }
            _ => (piece, None),
        };

        let (h, m) = time.split_once('h').ok_or_else(|| malformed("expected HHhMM"))?;
        let hour = parse_number(h.trim()).ok_or_else(|| malformed("invalid hour"))?;
        let minute = parse_number(m.trim()).ok_or_else(|| malformed("invalid minutes"))?;

        if hour > 23 {
            return Err(malformed("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(malformed("minute must be 0-59"));
        }

        Ok(Self {
            hour,
            minute,
            footnote,
        })
    }
}

fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Time tokens of one row, with the pieces that failed to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedTimes {
    pub tokens: Vec<RawTimeToken>,
    pub errors: Vec<RowError>,
}

/// Split the time list of a row into tokens, keeping their order.
///
/// Empty pieces (a trailing comma) are ignored; malformed pieces are
/// reported in `errors` and do not stop the rest of the row.
pub fn tokenize_times(times: &str) -> TokenizedTimes {
    let mut result = TokenizedTimes::default();

    for piece in times.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match RawTimeToken::parse(piece) {
            Ok(token) => result.tokens.push(token),
            Err(e) => result.errors.push(e),
        }
    }

    result
}

/// Split the leading room marker and number off a row's schedule text.
///
/// Returns the room number and the remaining time list. Rows that do not
/// start with `marker` followed by a non-zero number are not real sessions.
///
/// # Examples
///
/// ```
/// use showtime_engine::row::split_room;
///
/// let (room, rest) = split_room("Sala 5 14h30, 19h00b", "Sala").unwrap();
/// assert_eq!(room, 5);
/// assert_eq!(rest, "14h30, 19h00b");
///
/// assert!(split_room("14h30, 19h00", "Sala").is_err());
/// ```
pub fn split_room<'a>(text: &'a str, marker: &str) -> Result<(u32, &'a str), RowError> {
    let (lhs, rhs) = split_word(text.trim());
    if lhs != marker {
        return Err(RowError::MissingRoomNumber);
    }

    let (number, rest) = split_word(rhs);
    if number.is_empty() {
        return Err(RowError::MissingRoomNumber);
    }

    let room =
        parse_number(number).ok_or_else(|| RowError::MalformedRoomNumber(number.to_string()))?;
    if room == 0 {
        return Err(RowError::MissingRoomNumber);
    }

    Ok((room, rest))
}

/// Split off the first whitespace-delimited word, trimming both halves.
fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}
