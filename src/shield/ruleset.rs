//! Compiled malicious-path ruleset.
//!
//! # Responsibilities
//! - Compile built-in and configured patterns once, per category
//! - Classify a request path against the categories in order
//!
//! # Design Decisions
//! - One `RegexSet` per category: a single pass per category, no allocation per request
//! - Case-insensitive compilation instead of lowercasing every path
//! - Immutable after construction; shared behind `Arc` without locks

use regex::{RegexBuilder, RegexSet, RegexSetBuilder};
use std::borrow::Cow;
use thiserror::Error;

use crate::config::ShieldConfig;
use crate::shield::path::decode_path;
use crate::shield::rules::PatternCategory;

/// Error raised while compiling the ruleset.
#[derive(Debug, Error)]
pub enum ShieldError {
    #[error("invalid {category} pattern `{pattern}`: {source}")]
    InvalidPattern {
        category: PatternCategory,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Ordered set of compiled pattern categories.
#[derive(Debug, Clone)]
pub struct Ruleset {
    categories: Vec<(PatternCategory, RegexSet)>,
}

impl Ruleset {
    /// Ruleset made of the built-in table only.
    pub fn builtin() -> Result<Self, ShieldError> {
        Self::from_config(&ShieldConfig::default())
    }

    /// Ruleset that matches nothing.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Compile the ruleset described by the `[shield]` config section.
    pub fn from_config(config: &ShieldConfig) -> Result<Self, ShieldError> {
        let mut categories = Vec::new();

        for category in PatternCategory::ALL {
            let mut patterns: Vec<&str> = Vec::new();
            if config.builtin {
                patterns.extend_from_slice(category.builtin_patterns());
            }
            patterns.extend(
                config
                    .rules
                    .iter()
                    .filter(|rule| rule.category == category)
                    .map(|rule| rule.pattern.as_str()),
            );

            if patterns.is_empty() {
                continue;
            }

            categories.push((category, compile_category(category, &patterns)?));
        }

        let ruleset = Self { categories };
        tracing::debug!(
            categories = ruleset.categories.len(),
            patterns = ruleset.pattern_count(),
            "Shield ruleset compiled"
        );
        Ok(ruleset)
    }

    /// Return the first category whose patterns match `path`, raw or percent-decoded.
    pub fn classify(&self, path: &str) -> Option<PatternCategory> {
        let decoded = decode_path(path);
        let decoded = match &decoded {
            Cow::Owned(decoded) => Some(decoded.as_str()),
            Cow::Borrowed(_) => None,
        };

        self.categories
            .iter()
            .find(|(_, set)| set.is_match(path) || decoded.is_some_and(|d| set.is_match(d)))
            .map(|(category, _)| *category)
    }

    /// True if any pattern matches `path`.
    pub fn is_malicious(&self, path: &str) -> bool {
        self.classify(path).is_some()
    }

    /// Total number of compiled patterns.
    pub fn pattern_count(&self) -> usize {
        self.categories.iter().map(|(_, set)| set.len()).sum()
    }
}

fn compile_category(category: PatternCategory, patterns: &[&str]) -> Result<RegexSet, ShieldError> {
    // Compile one by one first so the error names the offending pattern.
    for pattern in patterns {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ShieldError::InvalidPattern {
                category,
                pattern: pattern.to_string(),
                source,
            })?;
    }

    RegexSetBuilder::new(patterns)
        .case_insensitive(true)
        .build()
        .map_err(|source| ShieldError::InvalidPattern {
            category,
            pattern: patterns.join(" | "),
            source,
        })
}
