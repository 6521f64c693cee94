//! Query engine: free-text pattern plus facet equality filters.
//!
//! A [`Query`] selects the entries where
//!
//! 1. the pattern matches the string form of at least one field (nested
//!    objects as JSON, the derived time category included), and
//! 2. every active facet filter equals the entry's value exactly.
//!
//! The pattern is a case-insensitive regular expression, or a literal
//! substring in [`SearchMode::Literal`]. An empty pattern matches every
//! entry; an empty filter value is inactive. Results keep dataset order.
//!
//! Patterns run on the `regex` crate, whose matching time is linear in the
//! input. Pattern length and compiled program size are capped by
//! [`QueryLimits`].

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::catalog::{Catalog, Entry};

/// How the pattern text is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Case-insensitive regular expression.
    #[default]
    Regex,
    /// Case-insensitive substring.
    Literal,
}

/// A pattern that cannot be used for searching.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("pattern is {len} characters long, the limit is {max}")]
    PatternTooLong { len: usize, max: usize },

    #[error("pattern compiles to more than {limit} bytes")]
    PatternTooComplex { limit: usize },

    #[error("{0}")]
    InvalidPattern(String),
}

/// Bounds applied when compiling a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Maximum pattern length in characters.
    pub max_pattern_len: usize,
    /// Maximum compiled regex size in bytes.
    pub regex_size_limit: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_pattern_len: 256,
            regex_size_limit: 1 << 20,
        }
    }
}

/// Equality filters on the facet fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub typ: Option<String>,
    pub region: Option<String>,
    pub zeit_kategorie: Option<String>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        active(&self.typ).is_none()
            && active(&self.region).is_none()
            && active(&self.zeit_kategorie).is_none()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        let record = entry.record();
        facet_eq(&self.typ, record.typ.as_deref())
            && facet_eq(&self.region, record.region.as_deref())
            && facet_eq(&self.zeit_kategorie, Some(entry.zeit_kategorie()))
    }
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|f| !f.is_empty())
}

fn facet_eq(filter: &Option<String>, value: Option<&str>) -> bool {
    match active(filter) {
        None => true,
        Some(wanted) => value == Some(wanted),
    }
}

/// A complete search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub pattern: String,
    pub mode: SearchMode,
    pub filters: Filters,
}

impl Query {
    /// Regex query without filters.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn literal(mut self) -> Self {
        self.mode = SearchMode::Literal;
        self
    }
}

/// Compiled pattern.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Option<Regex>,
}

impl Matcher {
    /// Compile a pattern. Surrounding whitespace is ignored; an empty
    /// pattern yields a matcher that accepts everything.
    pub fn compile(pattern: &str, mode: SearchMode, limits: &QueryLimits) -> Result<Self, QueryError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Ok(Self { regex: None });
        }

        let len = pattern.chars().count();
        if len > limits.max_pattern_len {
            return Err(QueryError::PatternTooLong {
                len,
                max: limits.max_pattern_len,
            });
        }

        let source = match mode {
            SearchMode::Regex => pattern.to_string(),
            SearchMode::Literal => regex::escape(pattern),
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .size_limit(limits.regex_size_limit)
            .build()
            .map_err(|err| match err {
                regex::Error::CompiledTooBig(limit) => QueryError::PatternTooComplex { limit },
                other => QueryError::InvalidPattern(other.to_string()),
            })?;

        Ok(Self { regex: Some(regex) })
    }

    /// The compiled regex, `None` for the empty pattern.
    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        match &self.regex {
            None => true,
            Some(re) => re.is_match(haystack),
        }
    }

    pub fn matches_entry(&self, entry: &Entry) -> bool {
        match &self.regex {
            None => true,
            Some(re) => entry.search_fields().iter().any(|f| re.is_match(f)),
        }
    }
}

/// Result of [`Catalog::search`]: the matches, plus the error that emptied
/// them if the pattern was unusable.
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub matches: Vec<&'a Entry>,
    pub error: Option<QueryError>,
}

impl SearchOutcome<'_> {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl Catalog {
    /// Run a query, failing on an unusable pattern.
    pub fn query(&self, query: &Query, limits: &QueryLimits) -> Result<Vec<&Entry>, QueryError> {
        let matcher = Matcher::compile(&query.pattern, query.mode, limits)?;
        Ok(self.select(&matcher, &query.filters))
    }

    /// Run a query; an unusable pattern yields no matches and is reported
    /// in [`SearchOutcome::error`].
    pub fn search(&self, query: &Query, limits: &QueryLimits) -> SearchOutcome<'_> {
        match self.query(query, limits) {
            Ok(matches) => SearchOutcome {
                matches,
                error: None,
            },
            Err(error) => SearchOutcome {
                matches: Vec::new(),
                error: Some(error),
            },
        }
    }

    /// Entries accepted by an already compiled matcher and the filters.
    pub fn select(&self, matcher: &Matcher, filters: &Filters) -> Vec<&Entry> {
        self.entries()
            .iter()
            .filter(|e| filters.matches(e) && matcher.matches_entry(e))
            .collect()
    }
}
