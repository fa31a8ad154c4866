//! AFTN header parsing.
//!
//! A telegram opens with a start-of-message line (`ZCZC <id> <date-time>`)
//! and a priority/primary-address line, followed by any number of
//! secondary-address lines and an optional origin line. Everything after
//! the origin line, or after the first line that opens a body part, is the
//! body.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ParseError;

/// Token that opens every telegram.
pub const START_INDICATOR: &str = "ZCZC";

/// Token that closes every telegram.
pub const END_OF_MESSAGE: &str = "NNNN";

const END_OF_HEADER: &str = ".";
const BEGIN_PART: &str = "BEGIN PART";

/// "<date-time> <originator>", an alternative origin-line encoding.
static ORIGINATOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date_time>[0-9]+)\s+(?P<originator>[A-Z]+)$").expect("valid regex")
});

static PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(SS|DD|FF|GG|KK|QU|QX|QS|QC|QD|QK|QN)$").expect("valid regex"));

static ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{7,8}$").expect("valid regex"));

/// Error returned by [`ParsedHeader::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderValidationError {
    #[error("invalid priority indicator: {0:?}")]
    Priority(String),

    #[error("invalid primary address: {0:?}")]
    Address(String),
}

/// The preamble of a telegram plus its remaining body text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedHeader {
    pub start_indicator: String,
    pub message_id: String,
    pub date_time: String,
    pub priority: String,
    pub primary_address: String,
    pub secondary_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originator_date_time: Option<String>,
    /// Body lines, each trimmed and newline-terminated
    pub body: String,
}

impl ParsedHeader {
    /// Check the priority indicator and primary address are well-formed.
    ///
    /// Parsing is lenient about these; call this when a caller needs them.
    pub fn validate(&self) -> Result<(), HeaderValidationError> {
        if !PRIORITY.is_match(&self.priority) {
            return Err(HeaderValidationError::Priority(self.priority.clone()));
        }
        if !ADDRESS.is_match(&self.primary_address) {
            return Err(HeaderValidationError::Address(self.primary_address.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Body,
}

/// Split a raw telegram into its preamble fields and body.
///
/// Line endings are normalised, blank lines dropped, and each line trimmed.
/// Only the start-of-message line is mandatory; a missing or short priority
/// line leaves the priority and primary address empty.
///
/// # Examples
///
/// ```
/// use telex_parser::telegram::parse_header;
///
/// let raw = "ZCZC TMQ2611 151524\nFF ZBAAZPZX\n151524 ZSSSZPZX\n(ARR-CCA1532-ZSSS-ZBAA0153)\nNNNN";
/// let header = parse_header(raw).unwrap();
/// assert_eq!(header.message_id, "TMQ2611");
/// assert_eq!(header.priority, "FF");
/// assert_eq!(header.originator.as_deref(), Some("ZSSSZPZX"));
/// assert_eq!(header.body, "(ARR-CCA1532-ZSSS-ZBAA0153)\nNNNN\n");
///
/// assert!(parse_header("ZCZC TMQ2611").is_err());
/// ```
pub fn parse_header(raw: &str) -> Result<ParsedHeader, ParseError> {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = normalized
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let first = lines.next().unwrap_or("");
    let fields: Vec<&str> = first.split_whitespace().collect();
    if !first.starts_with(START_INDICATOR) || fields.len() < 3 {
        return Err(ParseError::header_format(first));
    }

    let mut header = ParsedHeader {
        start_indicator: fields[0].to_string(),
        message_id: fields[1].to_string(),
        date_time: fields[2].to_string(),
        ..ParsedHeader::default()
    };

    if let Some(line) = lines.next() {
        let mut fields = line.split_whitespace();
        if let (Some(priority), Some(address)) = (fields.next(), fields.next()) {
            header.priority = priority.to_string();
            header.primary_address = address.to_string();
        } else {
            trace!(line, "short priority line");
        }
    }

    let mut state = State::Header;
    for line in lines {
        match state {
            State::Body => {
                header.body.push_str(line);
                header.body.push('\n');
            }
            State::Header => {
                if line == END_OF_HEADER || line == END_OF_MESSAGE {
                    continue;
                }

                if let Some(rest) = line.strip_prefix('.') {
                    let mut tokens = rest.split_whitespace();
                    if let (Some(originator), Some(date_time)) = (tokens.next(), tokens.next()) {
                        header.originator = Some(originator.to_string());
                        header.originator_date_time = Some(date_time.to_string());
                    }
                    state = State::Body;
                } else if line.starts_with(BEGIN_PART) || line.starts_with('(') {
                    header.body.push_str(line);
                    header.body.push('\n');
                    state = State::Body;
                } else if let Some(caps) = ORIGINATOR_LINE.captures(line) {
                    header.originator = Some(caps["originator"].to_string());
                    header.originator_date_time = Some(caps["date_time"].to_string());
                } else {
                    header.secondary_addresses.push(line.to_string());
                }
            }
        }
    }

    trace!(
        message_id = %header.message_id,
        in_body = state == State::Body,
        secondary = header.secondary_addresses.len(),
        "parsed header"
    );

    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTAM: &str = "
ZCZC NOTAM1234 230715
GG EDDNZEZN
.
GG EDDNYNYX
.BERLINTWR 230714

Q) EDMM/QOATT/IV/BO/A/000/999/4814N01120E005
A) EDDM
B) 2307150600 C) 2307151800
E) AERODROME CONTROL TOWER HOURS OF SERVICE
   0600-1800 DUE TO MAINTENANCE
NNNN
";

    #[test]
    fn parse_notam_header() {
        let header = parse_header(NOTAM).unwrap();
        assert_eq!(header.start_indicator, "ZCZC");
        assert_eq!(header.message_id, "NOTAM1234");
        assert_eq!(header.date_time, "230715");
        assert_eq!(header.priority, "GG");
        assert_eq!(header.primary_address, "EDDNZEZN");
        assert_eq!(header.secondary_addresses, vec!["GG EDDNYNYX"]);
        assert_eq!(header.originator.as_deref(), Some("BERLINTWR"));
        assert_eq!(header.originator_date_time.as_deref(), Some("230714"));
        assert_eq!(
            header.body,
            "Q) EDMM/QOATT/IV/BO/A/000/999/4814N01120E005\n\
             A) EDDM\n\
             B) 2307150600 C) 2307151800\n\
             E) AERODROME CONTROL TOWER HOURS OF SERVICE\n\
             0600-1800 DUE TO MAINTENANCE\n\
             NNNN\n"
        );
    }

    #[test]
    fn parse_multi_part_header() {
        let raw = "
            ZCZC TAF6789 160530
QU TSNZPCA
.
QU PEKUDCA TSNUOCA TSNZPCA TSNUFCA

BEGIN PART 02

(FORECAST AMENDMENT
VALID 1606/1700)

NNNN";
        let header = parse_header(raw).unwrap();
        assert_eq!(header.message_id, "TAF6789");
        assert_eq!(header.priority, "QU");
        assert_eq!(header.primary_address, "TSNZPCA");
        assert_eq!(
            header.secondary_addresses,
            vec!["QU PEKUDCA TSNUOCA TSNZPCA TSNUFCA"]
        );
        assert_eq!(header.originator, None);
        assert_eq!(
            header.body,
            "BEGIN PART 02\n(FORECAST AMENDMENT\nVALID 1606/1700)\nNNNN\n"
        );
    }

    #[test]
    fn numeric_origin_line_stays_in_header() {
        let raw = "ZCZC TMQ2611 151524\r\nFF SENDERAA\r\n151524 RECEIVERAA\r\n(ARR-AB123-SSR1234-KJFK-KLAX)";
        let header = parse_header(raw).unwrap();
        assert_eq!(header.originator.as_deref(), Some("RECEIVERAA"));
        assert_eq!(header.originator_date_time.as_deref(), Some("151524"));
        assert!(header.secondary_addresses.is_empty());
        assert_eq!(header.body, "(ARR-AB123-SSR1234-KJFK-KLAX)\n");
    }

    #[test]
    fn all_header_message_has_empty_body() {
        let raw = "ZCZC ABC0001 010000\nGG ZBAAZPZX\nGG ZSSSZPZX\nNNNN";
        let header = parse_header(raw).unwrap();
        assert_eq!(header.secondary_addresses, vec!["GG ZSSSZPZX"]);
        assert_eq!(header.body, "");
    }

    #[test]
    fn short_priority_line_is_lenient() {
        let header = parse_header("ZCZC ABC0001 010000\nGG\n(ARR-X1-ZSSS-ZBAA)").unwrap();
        assert_eq!(header.priority, "");
        assert_eq!(header.primary_address, "");
        assert_eq!(header.body, "(ARR-X1-ZSSS-ZBAA)\n");
    }

    #[test]
    fn origin_line_with_one_token_still_ends_header() {
        let header = parse_header("ZCZC ABC0001 010000\nGG ZBAAZPZX\n.ZBAAZPZX\nFREE TEXT").unwrap();
        assert_eq!(header.originator, None);
        assert_eq!(header.body, "FREE TEXT\n");
    }

    #[test]
    fn reject_short_start_line() {
        let err = parse_header("ZCZC\nTMQ2611\n151524").unwrap_err();
        assert_eq!(
            err,
            ParseError::HeaderFormat {
                line: "ZCZC".into()
            }
        );
    }

    #[test]
    fn reject_missing_start_indicator() {
        assert!(matches!(
            parse_header("GG ZBAAZPZX 010000\n(ARR-X1-ZSSS-ZBAA)"),
            Err(ParseError::HeaderFormat { .. })
        ));
        assert!(matches!(parse_header(""), Err(ParseError::HeaderFormat { .. })));
        assert!(matches!(parse_header("  \n \n"), Err(ParseError::HeaderFormat { .. })));
    }

    #[test]
    fn validate_preamble() {
        let header = parse_header(NOTAM).unwrap();
        assert_eq!(header.validate(), Ok(()));

        let mut bad = header.clone();
        bad.priority = "ZZ".into();
        assert_eq!(
            bad.validate(),
            Err(HeaderValidationError::Priority("ZZ".into()))
        );

        let mut bad = header;
        bad.primary_address = "zbaazpzx".into();
        assert_eq!(
            bad.validate(),
            Err(HeaderValidationError::Address("zbaazpzx".into()))
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Arbitrary input never panics
        #[test]
        fn never_panics(raw in "\\PC{0,200}") {
            let _ = parse_header(&raw);
        }

        /// A start line with fewer than three fields is always rejected
        #[test]
        fn short_start_line_rejected(id in "[A-Z0-9]{0,8}") {
            let raw = format!("ZCZC {id}\nGG ZBAAZPZX\n(ARR-X1-ZSSS-ZBAA)");
            prop_assert!(
                matches!(parse_header(&raw), Err(ParseError::HeaderFormat { .. })),
                "expected header format error"
            );
        }

        /// Secondary address lines are kept in order
        #[test]
        fn secondary_addresses_in_order(addrs in proptest::collection::vec("[A-Z]{2} [A-Z]{8}", 0..5)) {
            let mut raw = String::from("ZCZC ABC0001 010000\nGG ZBAAZPZX\n");
            for addr in &addrs {
                raw.push_str(addr);
                raw.push('\n');
            }
            raw.push_str("(ARR-X1-ZSSS-ZBAA)\n");
            let header = parse_header(&raw).unwrap();
            prop_assert_eq!(header.secondary_addresses, addrs);
        }
    }
}
