//! Parser configuration.
//!
//! Grammar and template tables can be supplied as JSON instead of using the
//! built-in sets. Fields left out of a config file keep their built-in
//! values, so a file that only lists schedule templates still parses
//! telegrams with the built-in grammars.
//!
//! ```json
//! {
//!   "patterns": [
//!     { "name": "ARR", "patterns": [ { "pattern": "^\\((?P<category>ARR)-…$", "comments": "arrival" } ] }
//!   ],
//!   "schedules": [
//!     { "airlines": ["MF"], "min_tokens": 5, "waypoint_start": 4,
//!       "fields": { "0": "index", "1": "flight_number", "2": "registration" } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Category, InvalidAirlineCode, InvalidCategory};
use crate::patterns::{PatternError, PatternTable, PatternTableBuilder};
use crate::schedule::{ScheduleField, TemplateTable, TemplateTableBuilder};

/// Errors from loading or compiling a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Category(#[from] InvalidCategory),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("schedule template: {0}")]
    Airline(#[from] InvalidAirlineCode),
}

/// One grammar source with its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSource {
    pub pattern: String,
    #[serde(default)]
    pub comments: String,
}

/// The grammars for one telegram category, in match order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatterns {
    /// Three-letter category tag
    pub name: String,
    pub patterns: Vec<PatternSource>,
}

/// A schedule template shared by one or more airlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub airlines: Vec<String>,
    pub min_tokens: usize,
    pub waypoint_start: usize,
    pub fields: BTreeMap<usize, ScheduleField>,
}

/// Grammar and template sources for the parsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub patterns: Vec<CategoryPatterns>,
    pub schedules: Vec<TemplateConfig>,
}

impl ParserConfig {
    /// Parse a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded parser configuration");
        Self::from_json_str(&json)
    }

    /// Compile the telegram grammars.
    pub fn pattern_table(&self) -> Result<PatternTable, ConfigError> {
        let mut builder = PatternTableBuilder::new();
        for group in &self.patterns {
            let category = Category::parse(&group.name)?;
            for source in &group.patterns {
                builder = builder.add(category, &source.pattern, &source.comments);
            }
        }
        Ok(builder.build()?)
    }

    /// Build the schedule template table.
    pub fn template_table(&self) -> Result<TemplateTable, ConfigError> {
        let mut builder = TemplateTableBuilder::new();
        for template in &self.schedules {
            builder = builder.add(
                template.airlines.iter().cloned(),
                template.min_tokens,
                template.waypoint_start,
                template.fields.iter().map(|(&position, &field)| (position, field)),
            );
        }
        Ok(builder.build()?)
    }
}

impl Default for ParserConfig {
    /// The built-in grammar and template sets.
    fn default() -> Self {
        let grammars = PatternTable::builtin();
        let patterns = grammars
            .categories()
            .into_iter()
            .map(|category| CategoryPatterns {
                name: category.to_string(),
                patterns: grammars
                    .patterns(category)
                    .unwrap_or_default()
                    .iter()
                    .map(|entry| PatternSource {
                        pattern: entry.source().to_string(),
                        comments: entry.comment().to_string(),
                    })
                    .collect(),
            })
            .collect();

        let schedules = TemplateTable::builtin()
            .templates()
            .iter()
            .map(|template| TemplateConfig {
                airlines: template.airlines.iter().map(|a| a.to_string()).collect(),
                min_tokens: template.min_tokens,
                waypoint_start: template.waypoint_start,
                fields: template.fields.clone(),
            })
            .collect();

        Self {
            patterns,
            schedules,
        }
    }
}
