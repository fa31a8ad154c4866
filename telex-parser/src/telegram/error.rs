//! Telegram parsing errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest piece of offending text carried in an error.
const SNIPPET_LIMIT: usize = 120;

/// Pipeline stage at which a telegram failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStage {
    Header,
    Category,
    PatternMatch,
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseStage::Header => "header",
            ParseStage::Category => "category",
            ParseStage::PatternMatch => "pattern match",
        })
    }
}

/// Errors from parsing a telegram.
///
/// Each variant carries the offending line or a snippet of the offending
/// text, so a caller can log it and keep the raw message as unparsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Start-of-message line is missing the indicator, id, or date-time
    #[error("invalid header line: {line:?}")]
    HeaderFormat { line: String },

    /// Body has no bracketed three-letter category
    #[error("no category found in body: {snippet:?}")]
    NoCategoryFound { snippet: String },

    /// Category is well-formed but has no grammars
    #[error("unknown category: {category}")]
    UnknownCategory { category: String },

    /// None of the category's grammars matched
    #[error("no matching pattern for {category} body: {snippet:?}")]
    NoPatternMatch { category: String, snippet: String },
}

impl ParseError {
    pub(crate) fn header_format(line: &str) -> Self {
        ParseError::HeaderFormat {
            line: snippet(line),
        }
    }

    pub(crate) fn no_category(body: &str) -> Self {
        ParseError::NoCategoryFound {
            snippet: snippet(body),
        }
    }

    pub(crate) fn no_pattern_match(category: &str, body: &str) -> Self {
        ParseError::NoPatternMatch {
            category: category.to_string(),
            snippet: snippet(body),
        }
    }

    /// The stage that failed.
    pub fn stage(&self) -> ParseStage {
        match self {
            ParseError::HeaderFormat { .. } => ParseStage::Header,
            ParseError::NoCategoryFound { .. } | ParseError::UnknownCategory { .. } => {
                ParseStage::Category
            }
            ParseError::NoPatternMatch { .. } => ParseStage::PatternMatch,
        }
    }
}

/// Truncate text to [`SNIPPET_LIMIT`] characters.
fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_LIMIT) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
