//! Single-token grammars for schedule telex lines.
//!
//! Each grammar matches one whole whitespace-separated token, except the
//! task grammar which only anchors at the end so that an index glued to the
//! front ("01)H/Z") is tolerated.

use std::sync::LazyLock;

use regex::Regex;

use super::ScheduleField;

static INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<idx>\(?L?[0-9]+\)?:?\.?)$").expect("valid regex"));

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<date>\d{2}[A-Z]{3})$").expect("valid regex"));

static TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<task>[A-Z]/[A-Z])$").expect("valid regex"));

static FLIGHT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<number>[0-9A-Z][0-9A-Z]\d{3,5}(?:/\d+)*)$").expect("valid regex")
});

static REGISTRATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<reg>B-?[0-9A-Z]{4})$").expect("valid regex"));

/// A bare time, printed on its own after the waypoint it belongs to.
static ALL_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<time>\d+(?:\(\d{2}[A-Z]{3}\))?)$").expect("valid regex")
});

/// Optional arrival time, airport, optional departure time.
pub(super) static WAYPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:SI:)?(?P<arr_time>\d{4}(?:\(\d{2}[A-Z]{3}\))?)?/?(?P<airport>[A-Z]{3})/?(?P<dep_time>\d{4}(?:\(\d{2}[A-Z]{3}\))?)?$",
    )
    .expect("valid regex")
});

fn capture<'t>(re: &Regex, token: &'t str, group: &str) -> Option<&'t str> {
    re.captures(token)
        .and_then(|caps| caps.name(group))
        .map(|m| m.as_str())
}

/// Match `token` against the grammar for `field`, returning the captured value.
///
/// # Examples
///
/// ```
/// use telex_parser::schedule::{ScheduleField, match_field};
///
/// assert_eq!(match_field(ScheduleField::Index, "(21)"), Some("(21)"));
/// assert_eq!(match_field(ScheduleField::Task, "01)H/Z"), Some("H/Z"));
/// assert_eq!(match_field(ScheduleField::Registration, "ILS"), None);
/// ```
pub fn match_field(field: ScheduleField, token: &str) -> Option<&str> {
    match field {
        ScheduleField::Index => capture(&INDEX, token, "idx"),
        ScheduleField::Date => capture(&DATE, token, "date"),
        ScheduleField::Task => capture(&TASK, token, "task"),
        ScheduleField::FlightNumber => capture(&FLIGHT_NUMBER, token, "number"),
        ScheduleField::Registration => capture(&REGISTRATION, token, "reg"),
    }
}

/// The time in a token that is nothing but a time.
pub(super) fn bare_time(token: &str) -> Option<&str> {
    capture(&ALL_DIGITS, token, "time")
}

/// Expand a compressed flight-number token into full flight numbers.
///
/// Every "/"-separated suffix replaces the trailing digits of the first
/// number, keeping its designator and any leading digits the suffix does
/// not cover.
///
/// # Examples
///
/// ```
/// use telex_parser::schedule::expand_flight_numbers;
///
/// assert_eq!(
///     expand_flight_numbers("CA1371/1372/1527"),
///     ["CA1371", "CA1372", "CA1527"]
/// );
/// assert_eq!(expand_flight_numbers("CZ3301/2"), ["CZ3301", "CZ3302"]);
/// assert_eq!(expand_flight_numbers("MF8193"), ["MF8193"]);
/// ```
pub fn expand_flight_numbers(token: &str) -> Vec<String> {
    let mut parts = token.split('/');
    let Some(first) = parts.next().filter(|f| !f.is_empty()) else {
        return Vec::new();
    };

    let mut numbers = vec![first.to_string()];
    for suffix in parts.filter(|p| !p.is_empty()) {
        let keep = first.len().saturating_sub(suffix.len()).max(2);
        let head = first.get(..keep).unwrap_or(first);
        numbers.push(format!("{head}{suffix}"));
    }
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_forms() {
        for token in ["83.", "(21)", "L59", "(205)", "L01", "01)", "L1:", "1)", "13"] {
            assert_eq!(match_field(ScheduleField::Index, token), Some(token), "{token}");
        }
        assert_eq!(match_field(ScheduleField::Index, "W/Z"), None);
        assert_eq!(match_field(ScheduleField::Index, "LL1"), None);
    }

    #[test]
    fn dates() {
        assert_eq!(match_field(ScheduleField::Date, "31OCT"), Some("31OCT"));
        assert_eq!(match_field(ScheduleField::Date, "29OCT"), Some("29OCT"));
        assert_eq!(match_field(ScheduleField::Date, "3OCT"), None);
    }

    #[test]
    fn tasks() {
        assert_eq!(match_field(ScheduleField::Task, "W/Z"), Some("W/Z"));
        assert_eq!(match_field(ScheduleField::Task, "01)H/Z"), Some("H/Z"));
        assert_eq!(match_field(ScheduleField::Task, "W/ZZ"), None);
    }

    #[test]
    fn flight_numbers() {
        for token in ["FM9134", "Y87969", "CK261", "9C8812", "CA1371/1372/1527"] {
            assert_eq!(
                match_field(ScheduleField::FlightNumber, token),
                Some(token),
                "{token}"
            );
        }
        assert_eq!(match_field(ScheduleField::FlightNumber, "W/Z"), None);
        assert_eq!(match_field(ScheduleField::FlightNumber, "CK26"), None);
    }

    #[test]
    fn registrations() {
        assert_eq!(match_field(ScheduleField::Registration, "B2688"), Some("B2688"));
        assert_eq!(match_field(ScheduleField::Registration, "B-6513"), Some("B-6513"));
        assert_eq!(match_field(ScheduleField::Registration, "B30AA"), Some("B30AA"));
        assert_eq!(match_field(ScheduleField::Registration, "CRJ7"), None);
    }

    #[test]
    fn bare_times() {
        assert_eq!(bare_time("0235"), Some("0235"));
        assert_eq!(bare_time("2350(28OCT)"), Some("2350(28OCT)"));
        assert_eq!(bare_time("1305TSN"), None);
        assert_eq!(bare_time("(6)"), None);
    }

    #[test]
    fn expansion() {
        assert_eq!(
            expand_flight_numbers("CA1371/1372/1527"),
            ["CA1371", "CA1372", "CA1527"]
        );
        assert_eq!(expand_flight_numbers("CZ3301/2"), ["CZ3301", "CZ3302"]);
        assert_eq!(expand_flight_numbers("HU7205"), ["HU7205"]);
        assert_eq!(expand_flight_numbers("HU7205/"), ["HU7205"]);
        assert!(expand_flight_numbers("").is_empty());
    }

    #[test]
    fn long_suffix_keeps_designator() {
        assert_eq!(expand_flight_numbers("CK261/12345"), ["CK261", "CK12345"]);
    }
}
