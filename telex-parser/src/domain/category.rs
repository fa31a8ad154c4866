//! Telegram category tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when a three-letter tag is not a supported category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported telegram category: {tag}")]
pub struct InvalidCategory {
    tag: String,
}

impl InvalidCategory {
    /// The tag that failed to parse.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// The ICAO message category carried in a telegram's bracketed body prefix.
///
/// The category selects both the grammar set used to extract fields and
/// the record variant those fields are built into.
///
/// # Examples
///
/// ```
/// use telex_parser::domain::Category;
///
/// let cat = Category::parse("FPL").unwrap();
/// assert_eq!(cat, Category::Fpl);
/// assert_eq!(cat.as_str(), "FPL");
///
/// assert!(Category::parse("XYZ").is_err());
/// assert!(Category::parse("fpl").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Arrival
    Arr,
    /// Departure
    Dep,
    /// Filed flight plan
    Fpl,
    /// Cancellation
    Cnl,
    /// Delay
    Dla,
    /// Modification
    Chg,
    /// Current flight plan
    Cpl,
    /// Alerting
    Aln,
}

impl Category {
    /// All categories, in a stable order.
    pub const ALL: [Category; 8] = [
        Category::Arr,
        Category::Dep,
        Category::Fpl,
        Category::Cnl,
        Category::Dla,
        Category::Chg,
        Category::Cpl,
        Category::Aln,
    ];

    /// Parse a category from its three-letter uppercase tag.
    pub fn parse(s: &str) -> Result<Self, InvalidCategory> {
        match s {
            "ARR" => Ok(Category::Arr),
            "DEP" => Ok(Category::Dep),
            "FPL" => Ok(Category::Fpl),
            "CNL" => Ok(Category::Cnl),
            "DLA" => Ok(Category::Dla),
            "CHG" => Ok(Category::Chg),
            "CPL" => Ok(Category::Cpl),
            "ALN" => Ok(Category::Aln),
            other => Err(InvalidCategory {
                tag: other.to_string(),
            }),
        }
    }

    /// Returns the three-letter tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Arr => "ARR",
            Category::Dep => "DEP",
            Category::Fpl => "FPL",
            Category::Cnl => "CNL",
            Category::Dla => "DLA",
            Category::Chg => "CHG",
            Category::Cpl => "CPL",
            Category::Aln => "ALN",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_tag() {
        for cat in Category::ALL {
            assert_eq!(Category::parse(cat.as_str()), Ok(cat));
        }
    }

    #[test]
    fn reject_unknown_tag() {
        let err = Category::parse("XYZ").unwrap_err();
        assert_eq!(err.tag(), "XYZ");
        assert_eq!(err.to_string(), "unsupported telegram category: XYZ");
    }

    #[test]
    fn reject_lowercase() {
        assert!(Category::parse("arr").is_err());
        assert!(Category::parse("Dep").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Category::Dla.to_string(), "DLA");
    }

    #[test]
    fn serde_uses_tag() {
        let json = serde_json::to_string(&Category::Chg).unwrap();
        assert_eq!(json, "\"CHG\"");
        let back: Category = serde_json::from_str("\"ALN\"").unwrap();
        assert_eq!(back, Category::Aln);
    }
}
