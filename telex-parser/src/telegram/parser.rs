//! The telegram parsing pipeline.
//!
//! raw text → header → category → first matching grammar → record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::body::extract_body;
use super::build::build_record;
use super::header::{ParsedHeader, parse_header};
use super::record::TelegramRecord;
use super::{ParseError, ParseStage};
use crate::domain::Category;
use crate::patterns::PatternTable;

/// A telegram exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTelegram {
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl RawTelegram {
    /// Capture a telegram received now.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_received_at(text, Utc::now())
    }

    pub fn with_received_at(text: impl Into<String>, received_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            received_at,
        }
    }
}

/// A successfully parsed telegram.
///
/// `header` is `None` when the input was a bare bracketed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTelegram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<ParsedHeader>,
    pub category: Category,
    pub record: TelegramRecord,
}

/// A raw telegram together with the outcome of parsing it.
///
/// Produced for every input, parsed or not, so callers can keep failures
/// for later inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramEnvelope {
    pub raw: RawTelegram,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedTelegram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<ParseStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TelegramEnvelope {
    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }
}

/// Parses telegrams against a fixed grammar table.
///
/// The parser holds no mutable state; one instance can serve any number
/// of threads by shared reference.
///
/// # Examples
///
/// ```
/// use telex_parser::domain::Category;
/// use telex_parser::telegram::{TelegramParser, TelegramRecord};
///
/// let parser = TelegramParser::builtin();
/// let parsed = parser.parse("(DEP-AB123-SSR1234-KJFK-1500-KLAX)").unwrap();
/// assert_eq!(parsed.category, Category::Dep);
/// assert!(parsed.header.is_none());
///
/// let TelegramRecord::Dep(dep) = parsed.record else { unreachable!() };
/// assert_eq!(dep.departure_time, "1500");
/// assert_eq!(dep.destination, "KLAX");
/// ```
#[derive(Debug, Clone)]
pub struct TelegramParser {
    patterns: PatternTable,
}

impl TelegramParser {
    pub fn new(patterns: PatternTable) -> Self {
        Self { patterns }
    }

    /// A parser using [`PatternTable::builtin`].
    pub fn builtin() -> Self {
        Self::new(PatternTable::builtin())
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Parse a full telegram, or a bare bracketed body.
    ///
    /// The returned record is not validated; call
    /// [`TelegramRecord::validate`] when required fields matter.
    pub fn parse(&self, raw: &str) -> Result<ParsedTelegram, ParseError> {
        let trimmed = raw.trim_start();
        if trimmed.starts_with('(') {
            let (category, record) = self.parse_body(trimmed)?;
            return Ok(ParsedTelegram {
                header: None,
                category,
                record,
            });
        }

        let header = parse_header(raw)?;
        let (category, record) = self.parse_body(&header.body)?;
        Ok(ParsedTelegram {
            header: Some(header),
            category,
            record,
        })
    }

    /// Detect the category of a body, extract its fields, and build the record.
    pub fn parse_body(&self, body: &str) -> Result<(Category, TelegramRecord), ParseError> {
        let (category, fields) = extract_body(body, &self.patterns)?;
        Ok((category, build_record(category, &fields)))
    }

    /// Parse a captured telegram, keeping it whatever the outcome.
    pub fn ingest(&self, raw: RawTelegram) -> TelegramEnvelope {
        match self.parse(&raw.text) {
            Ok(parsed) => TelegramEnvelope {
                raw,
                parsed: Some(parsed),
                failed_stage: None,
                error: None,
            },
            Err(e) => {
                debug!(stage = %e.stage(), error = %e, "telegram left unparsed");
                TelegramEnvelope {
                    raw,
                    parsed: None,
                    failed_stage: Some(e.stage()),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

impl Default for TelegramParser {
    fn default() -> Self {
        Self::builtin()
    }
}
