//! Footnote code letters.

use std::fmt;

/// Error returned when a footnote label is not a single letter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid footnote label {label:?}: must be a single letter")]
pub struct InvalidFootnoteCode {
    label: String,
}

/// The single letter that ties a time token to its footnote.
///
/// Listing pages print a letter after a showtime ("19h00b") and explain it
/// in a footnote labelled with the same letter. Codes are case-sensitive.
///
/// # Examples
///
/// ```
/// use showtime_engine::footnote::FootnoteCode;
///
/// let code = FootnoteCode::parse(" b ").unwrap();
/// assert_eq!(code.as_char(), 'b');
///
/// assert!(FootnoteCode::parse("ab").is_err());
/// assert!(FootnoteCode::parse("1").is_err());
/// assert!(FootnoteCode::parse("").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FootnoteCode(char);

impl FootnoteCode {
    /// Wrap a character, if it is a letter.
    pub fn new(c: char) -> Option<Self> {
        c.is_alphabetic().then_some(Self(c))
    }

    /// Parse a footnote label, ignoring surrounding whitespace.
    pub fn parse(label: &str) -> Result<Self, InvalidFootnoteCode> {
        let mut chars = label.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c).ok_or_else(|| InvalidFootnoteCode {
                label: label.to_string(),
            }),
            _ => Err(InvalidFootnoteCode {
                label: label.to_string(),
            }),
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Debug for FootnoteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FootnoteCode({})", self.0)
    }
}

impl fmt::Display for FootnoteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_letters() {
        assert_eq!(FootnoteCode::parse("a").unwrap().as_char(), 'a');
        assert_eq!(FootnoteCode::parse("Z").unwrap().as_char(), 'Z');
        assert_eq!(FootnoteCode::parse("\tc\n").unwrap().as_char(), 'c');
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert_ne!(
            FootnoteCode::parse("a").unwrap(),
            FootnoteCode::parse("A").unwrap()
        );
    }

    #[test]
    fn reject_non_letters() {
        assert!(FootnoteCode::parse("*").is_err());
        assert!(FootnoteCode::parse("9").is_err());
        assert!(FootnoteCode::new('(').is_none());
    }

    #[test]
    fn error_display() {
        let err = FootnoteCode::parse("xy").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid footnote label \"xy\": must be a single letter"
        );
    }
}
