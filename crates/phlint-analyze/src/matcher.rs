//! Name/type matching against configured pattern sets
//!
//! Patterns are evaluated in declared order, first match wins, an exhausted
//! set means "no match". Matching is case-sensitive: PHP property and
//! namespace-path comparisons in rule configuration are exact-case.

use std::fmt;
use std::sync::Arc;

use serde::de::{Deserialize, Deserializer};

/// One match specification.
#[derive(Clone)]
pub enum NamePattern {
    /// Full string equality
    Exact(String),
    /// `*` wildcard; leading `*` matches a suffix, trailing `*` a prefix,
    /// both a substring; interior wildcards are supported (`*\ValueObject\*`)
    Glob(String),
    /// Arbitrary predicate, built programmatically
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl NamePattern {
    /// Classify a plain string: anything containing `*` is a glob.
    pub fn from_string(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if pattern.contains('*') {
            NamePattern::Glob(pattern)
        } else {
            NamePattern::Exact(pattern)
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Exact(pattern) => pattern == name,
            NamePattern::Glob(pattern) => glob_match(pattern, name),
            NamePattern::Predicate(predicate) => predicate(name),
        }
    }
}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePattern::Exact(pattern) => f.debug_tuple("Exact").field(pattern).finish(),
            NamePattern::Glob(pattern) => f.debug_tuple("Glob").field(pattern).finish(),
            NamePattern::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Ordered pattern set; total over any input name.
#[derive(Debug, Clone, Default)]
pub struct NamePatternSet {
    patterns: Vec<NamePattern>,
}

impl NamePatternSet {
    pub fn new(patterns: Vec<NamePattern>) -> Self {
        Self { patterns }
    }

    pub fn from_strings<I>(patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(NamePattern::from_string)
                .collect(),
        }
    }

    /// First matching pattern wins; `false` when the set is exhausted.
    pub fn is_match(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(name))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<'de> Deserialize<'de> for NamePatternSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(NamePatternSet::from_strings(raw))
    }
}

/// `*`-wildcard match, anchored at both ends. Implemented by scanning the
/// literal segments between wildcards in order; `\` is an ordinary
/// character (PHP namespace separator), never an escape.
fn glob_match(pattern: &str, name: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == name;
    }
    let segments: Vec<&str> = pattern.split('*').collect();
    let last = segments.len() - 1;
    let mut pos = 0usize;

    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        if i == 0 {
            if !name.starts_with(segment) {
                return false;
            }
            pos = segment.len();
        } else if i == last {
            return name.ends_with(segment) && name.len() - segment.len() >= pos;
        } else {
            match name[pos..].find(segment) {
                Some(found) => pos += found + segment.len(),
                None => return false,
            }
        }
    }
    true
}
