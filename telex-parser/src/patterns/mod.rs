//! Named-capture grammar tables for telegram bodies.
//!
//! A [`PatternTable`] maps each [`Category`] to an ordered list of
//! grammars. The body extractor tries them in table order and the first one
//! that matches wins. Tables are built once and never mutated afterwards, so
//! a single table can be shared by reference across threads.

mod builtin;

use std::collections::HashMap;

use regex::Regex;

use crate::domain::Category;

/// Error returned when a grammar source does not compile.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid {category} pattern {source_text:?}: {reason}")]
pub struct PatternError {
    category: Category,
    source_text: String,
    reason: String,
}

impl PatternError {
    /// The category the failing grammar was registered under.
    pub fn category(&self) -> Category {
        self.category
    }
}

/// One compiled grammar with the source it was compiled from.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    source: String,
    comment: String,
    regex: Regex,
}

impl PatternEntry {
    /// Compile a grammar for `category`.
    pub fn compile(
        category: Category,
        source: impl Into<String>,
        comment: impl Into<String>,
    ) -> Result<Self, PatternError> {
        let source = source.into();
        let regex = Regex::new(&source).map_err(|e| PatternError {
            category,
            source_text: source.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source,
            comment: comment.into(),
            regex,
        })
    }

    /// The grammar as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Human-readable description of the telegram shape this grammar covers.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Category → ordered grammars.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    grammars: HashMap<Category, Vec<PatternEntry>>,
}

impl PatternTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in grammar set covering all eight categories.
    ///
    /// # Examples
    ///
    /// ```
    /// use telex_parser::domain::Category;
    /// use telex_parser::patterns::PatternTable;
    ///
    /// let table = PatternTable::builtin();
    /// for category in Category::ALL {
    ///     assert!(table.patterns(category).is_some());
    /// }
    /// ```
    pub fn builtin() -> Self {
        builtin::builder()
            .build()
            .expect("built-in grammars are valid regular expressions")
    }

    /// Append a compiled grammar to the end of a category's list.
    pub fn push(&mut self, category: Category, entry: PatternEntry) {
        self.grammars.entry(category).or_default().push(entry);
    }

    /// Grammars registered for a category, in match order.
    ///
    /// Returns `None` if the category has no grammars at all.
    pub fn patterns(&self, category: Category) -> Option<&[PatternEntry]> {
        self.grammars
            .get(&category)
            .map(Vec::as_slice)
            .filter(|entries| !entries.is_empty())
    }

    /// Returns true if the category has at least one grammar.
    pub fn contains(&self, category: Category) -> bool {
        self.patterns(category).is_some()
    }

    /// Categories with at least one grammar, in a stable order.
    pub fn categories(&self) -> Vec<Category> {
        let mut cats: Vec<Category> = self
            .grammars
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(cat, _)| *cat)
            .collect();
        cats.sort();
        cats
    }

    /// Total number of grammars across all categories.
    pub fn len(&self) -> usize {
        self.grammars.values().map(Vec::len).sum()
    }

    /// Returns true if the table holds no grammars.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for pattern tables.
///
/// Sources are collected uncompiled and compiled together in [`build`],
/// which reports the first grammar that fails.
///
/// [`build`]: PatternTableBuilder::build
#[derive(Debug, Default)]
pub struct PatternTableBuilder {
    sources: Vec<(Category, String, String)>,
}

impl PatternTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grammar after any already registered for `category`.
    pub fn add(
        mut self,
        category: Category,
        source: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        self.sources.push((category, source.into(), comment.into()));
        self
    }

    /// Compile every registered grammar.
    pub fn build(self) -> Result<PatternTable, PatternError> {
        let mut table = PatternTable::new();
        for (category, source, comment) in self.sources {
            let entry = PatternEntry::compile(category, source, comment)?;
            table.push(category, entry);
        }
        Ok(table)
    }
}
