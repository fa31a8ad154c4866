//! Airline designator type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when parsing an invalid airline designator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airline code: {reason}")]
pub struct InvalidAirlineCode {
    reason: &'static str,
}

/// A two-character IATA airline designator.
///
/// Designators are two uppercase ASCII letters or digits (e.g. "CA", "8X",
/// "3U", "Y8"), but never two digits.
///
/// # Examples
///
/// ```
/// use telex_parser::domain::AirlineCode;
///
/// let code = AirlineCode::parse("8X").unwrap();
/// assert_eq!(code.as_str(), "8X");
///
/// assert!(AirlineCode::parse("ca").is_err());
/// assert!(AirlineCode::parse("12").is_err());
/// assert!(AirlineCode::parse("CCA").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirlineCode([u8; 2]);

impl AirlineCode {
    /// Parse an airline designator from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidAirlineCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidAirlineCode {
                reason: "must be exactly 2 characters",
            });
        }

        for &b in bytes {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidAirlineCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        if bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidAirlineCode {
                reason: "must contain at least one letter",
            });
        }

        Ok(AirlineCode([bytes[0], bytes[1]]))
    }

    /// Returns the designator as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII letters and digits
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl TryFrom<String> for AirlineCode {
    type Error = InvalidAirlineCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AirlineCode> for String {
    fn from(code: AirlineCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Debug for AirlineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirlineCode({})", self.as_str())
    }
}

impl fmt::Display for AirlineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        for code in ["CA", "FM", "MF", "8X", "3U", "9C", "Y8", "G5", "ZH"] {
            assert!(AirlineCode::parse(code).is_ok(), "{code}");
        }
    }

    #[test]
    fn reject_lowercase() {
        assert!(AirlineCode::parse("fm").is_err());
        assert!(AirlineCode::parse("Fm").is_err());
    }

    #[test]
    fn reject_all_digits() {
        let err = AirlineCode::parse("88").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid airline code: must contain at least one letter"
        );
    }

    #[test]
    fn reject_wrong_length() {
        assert!(AirlineCode::parse("").is_err());
        assert!(AirlineCode::parse("C").is_err());
        assert!(AirlineCode::parse("CCA").is_err());
    }

    #[test]
    fn debug_and_display() {
        let code = AirlineCode::parse("HU").unwrap();
        assert_eq!(format!("{code}"), "HU");
        assert_eq!(format!("{code:?}"), "AirlineCode(HU)");
    }

    #[test]
    fn serde_as_string() {
        let code = AirlineCode::parse("JD").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"JD\"");
        let back: AirlineCode = serde_json::from_str("\"JD\"").unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<AirlineCode>("\"jd\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any letter-bearing pair parses and prints back unchanged
        #[test]
        fn roundtrip(s in "[A-Z][A-Z0-9]|[0-9][A-Z]") {
            let code = AirlineCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        #[test]
        fn wrong_length_rejected(s in "[A-Z0-9]{3,6}") {
            prop_assert!(AirlineCode::parse(&s).is_err());
        }
    }
}
