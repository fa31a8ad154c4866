//! Category detection and grammar-driven field extraction.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, trace};

use super::ParseError;
use crate::domain::Category;
use crate::patterns::PatternTable;

/// Bracketed three-letter category at the start of a line.
static CATEGORY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\((?P<category>[A-Z]{3})-").expect("valid regex"));

/// Capture-group name → trimmed matched text.
///
/// Only groups that took part in the match are present. Groups that matched
/// an empty string are stored but read back as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMap {
    fields: BTreeMap<String, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every named group that participated in `caps`.
    pub fn from_captures(regex: &Regex, caps: &Captures<'_>) -> Self {
        let fields = regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.to_string(), m.as_str().trim().to_string()))
            })
            .collect();
        Self { fields }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into().trim().to_string());
    }

    /// The value of a field, if present and non-empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Owned copy of a field, if present and non-empty.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// Owned copy of a field, or an empty string.
    pub fn text_or_empty(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Find the bracketed category tag in a body.
///
/// Returns the tag text and the byte offset of its opening parenthesis.
fn find_category(body: &str) -> Result<(&str, usize), ParseError> {
    let caps = CATEGORY_TAG
        .captures(body)
        .ok_or_else(|| ParseError::no_category(body))?;
    let tag = caps
        .name("category")
        .ok_or_else(|| ParseError::no_category(body))?;
    let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
    Ok((tag.as_str(), start))
}

/// Extract the three-letter category tag from a body.
///
/// The tag may be any three uppercase letters; whether it is a supported
/// category is decided by [`extract_body`].
///
/// # Examples
///
/// ```
/// use telex_parser::telegram::detect_category;
///
/// assert_eq!(detect_category("(ARR-AB123-KJFK-KLAX)").unwrap(), "ARR");
/// assert_eq!(detect_category("BEGIN PART 01\n(XYZ-1)").unwrap(), "XYZ");
/// assert!(detect_category("NO CATEGORY HERE").is_err());
/// ```
pub fn detect_category(body: &str) -> Result<&str, ParseError> {
    find_category(body).map(|(tag, _)| tag)
}

/// The bracketed message inside a body: from the category's opening
/// parenthesis up to and including the last closing parenthesis.
///
/// Trailing end-of-message markers and part separators are dropped. If no
/// closing parenthesis follows, the remainder is returned as is.
fn bracketed(body: &str, start: usize) -> &str {
    let rest = &body[start..];
    match rest.rfind(')') {
        Some(end) => &rest[..=end],
        None => rest.trim_end(),
    }
}

/// Detect the category of a body and extract its fields.
///
/// Grammars for the category are tried in table order and the first match
/// wins; later grammars are never consulted once one matches.
pub fn extract_body(
    body: &str,
    patterns: &PatternTable,
) -> Result<(Category, FieldMap), ParseError> {
    let (tag, start) = find_category(body)?;

    let unknown = || ParseError::UnknownCategory {
        category: tag.to_string(),
    };
    let category = Category::parse(tag).map_err(|_| unknown())?;
    let grammars = patterns.patterns(category).ok_or_else(unknown)?;

    let message = bracketed(body, start);

    for (index, entry) in grammars.iter().enumerate() {
        trace!(%category, index, comment = entry.comment(), "trying pattern");
        if let Some(caps) = entry.regex().captures(message) {
            debug!(%category, index, comment = entry.comment(), "pattern matched");
            return Ok((category, FieldMap::from_captures(entry.regex(), &caps)));
        }
    }

    debug!(%category, tried = grammars.len(), "no pattern matched");
    Err(ParseError::no_pattern_match(tag, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternTableBuilder;

    fn table() -> PatternTable {
        PatternTable::builtin()
    }

    #[test]
    fn field_map_hides_empty_values() {
        let mut fields = FieldMap::new();
        fields.insert("alter", "   ");
        fields.insert("dep", " ZSSS ");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("alter"), None);
        assert_eq!(fields.get("dep"), Some("ZSSS"));
        assert_eq!(fields.text_or_empty("missing"), "");
        assert_eq!(fields.text("dep").as_deref(), Some("ZSSS"));
    }

    #[test]
    fn detect_category_anywhere_at_line_start() {
        assert_eq!(detect_category("NNNN\n(DEP-X1-ZSSS2035-ZBAA)").unwrap(), "DEP");
        assert!(detect_category("TEXT (ARR-X1)").is_err());
        assert!(detect_category("(AR-X1)").is_err());
        assert!(detect_category("(ARR X1)").is_err());
    }

    #[test]
    fn no_category_error() {
        let err = extract_body("HELLO WORLD", &table()).unwrap_err();
        assert!(matches!(err, ParseError::NoCategoryFound { .. }));
    }

    #[test]
    fn unknown_category_names_the_tag() {
        let err = extract_body("(XYZ-AB123-SSR1234-KJFK-KLAX)", &table()).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownCategory {
                category: "XYZ".into()
            }
        );
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn category_missing_from_table_is_unknown() {
        let only_arr = PatternTableBuilder::new()
            .add(Category::Arr, r"^\((?P<category>ARR)-(?P<number>\w+)\)$", "arr")
            .build()
            .unwrap();
        let err = extract_body("(DEP-X1-ZSSS2035-ZBAA)", &only_arr).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownCategory {
                category: "DEP".into()
            }
        );
    }

    #[test]
    fn extract_arr_fields() {
        let (category, fields) = extract_body("(ARR-AB123-SSR1234-KJFK-KLAX)", &table()).unwrap();
        assert_eq!(category, Category::Arr);
        assert_eq!(fields.get("category"), Some("ARR"));
        assert_eq!(fields.get("number"), Some("AB123"));
        assert_eq!(fields.get("ssr"), Some("SSR1234"));
        assert_eq!(fields.get("dep"), Some("KJFK"));
        assert_eq!(fields.get("arr"), Some("KLAX"));
        assert_eq!(fields.get("arr_time"), None);
    }

    #[test]
    fn trailing_end_of_message_is_ignored() {
        let body = "(DEP-AB123-SSR1234-KJFK-1500-KLAX)\nNNNN\n";
        let (category, fields) = extract_body(body, &table()).unwrap();
        assert_eq!(category, Category::Dep);
        assert_eq!(fields.get("dep_time"), Some("1500"));
        assert_eq!(fields.get("dest"), Some("KLAX"));
    }

    #[test]
    fn first_matching_pattern_wins() {
        let table = PatternTableBuilder::new()
            .add(Category::Arr, r"^\((?P<category>ARR)-(?P<number>[A-Z]+)\)$", "letters")
            .add(Category::Arr, r"^\((?P<category>ARR)-(?P<number>\w+)\)$", "any")
            .add(Category::Arr, r"^\((?P<category>ARR)-(?P<first>\w+)\)$", "never reached")
            .build()
            .unwrap();

        let (_, fields) = extract_body("(ARR-ABC)", &table).unwrap();
        assert_eq!(fields.get("number"), Some("ABC"));
        assert_eq!(fields.get("first"), None);

        let (_, fields) = extract_body("(ARR-AB1)", &table).unwrap();
        assert_eq!(fields.get("number"), Some("AB1"));
        assert_eq!(fields.get("first"), None);
    }

    #[test]
    fn no_pattern_match_carries_snippet() {
        let err = extract_body("(ARR-???)", &table()).unwrap_err();
        assert_eq!(
            err,
            ParseError::NoPatternMatch {
                category: "ARR".into(),
                snippet: "(ARR-???)".into()
            }
        );
    }

    #[test]
    fn unparticipating_groups_are_absent() {
        let (_, fields) = extract_body("(ARR-AB123-KJFK-KLAX1200)", &table()).unwrap();
        assert_eq!(fields.get("ssr"), None);
        assert_eq!(fields.get("arr_time"), Some("1200"));
        assert!(fields.iter().all(|(name, _)| name != "ssr"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Arbitrary text never panics the extractor
        #[test]
        fn never_panics(body in "\\PC{0,200}") {
            let _ = extract_body(&body, &PatternTable::builtin());
        }

        /// Unsupported tags always surface as unknown categories
        #[test]
        fn unsupported_tag_is_unknown(tag in "[A-Z]{3}".prop_filter("unsupported", |t| Category::parse(t).is_err())) {
            let body = format!("({tag}-AB123-KJFK-KLAX)");
            let err = extract_body(&body, &PatternTable::builtin()).unwrap_err();
            prop_assert_eq!(err, ParseError::UnknownCategory { category: tag });
        }
    }
}
