//! Schedule airport code type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code, as printed in schedule telex waypoints.
///
/// # Examples
///
/// ```
/// use telex_parser::domain::AirportCode;
///
/// let tsn = AirportCode::parse("TSN").unwrap();
/// assert_eq!(tsn.as_str(), "TSN");
///
/// assert!(AirportCode::parse("tsn").is_err());
/// assert!(AirportCode::parse("ZBTJ").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidAirportCode {
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidAirportCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(AirportCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the airport code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl TryFrom<String> for AirportCode {
    type Error = InvalidAirportCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert!(AirportCode::parse("TSN").is_ok());
        assert!(AirportCode::parse("PVG").is_ok());
        assert!(AirportCode::parse("HAK").is_ok());
    }

    #[test]
    fn reject_invalid() {
        assert!(AirportCode::parse("").is_err());
        assert!(AirportCode::parse("TS").is_err());
        assert!(AirportCode::parse("ZBTJ").is_err());
        assert!(AirportCode::parse("T5N").is_err());
        assert!(AirportCode::parse("tsn").is_err());
    }

    #[test]
    fn debug() {
        let code = AirportCode::parse("CKG").unwrap();
        assert_eq!(format!("{:?}", code), "AirportCode(CKG)");
    }

    #[test]
    fn serde_as_string() {
        let code = AirportCode::parse("SHA").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"SHA\"");
        assert_eq!(serde_json::from_str::<AirportCode>(&json).unwrap(), code);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn roundtrip(s in "[A-Z]{3}") {
            let code = AirportCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        #[test]
        fn digits_rejected(s in "[A-Z0-9]{3}".prop_filter("has digit", |s| s.chars().any(|c| c.is_ascii_digit()))) {
            prop_assert!(AirportCode::parse(&s).is_err());
        }
    }
}
