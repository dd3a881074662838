// Pattern compilation for match gates, conditions, stem patterns and infix
// positions. A pattern that does not compile is reported as
// `MorphError::MalformedPattern` and never panics.

use regex::Regex;

use glossa_core::error::MorphError;
use glossa_core::rule::WILDCARD_PATTERN;

pub(crate) fn compile(pattern: &str) -> Result<Regex, MorphError> {
    Regex::new(pattern).map_err(|e| MorphError::MalformedPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Whether `pattern` matches anywhere in `word`.
pub(crate) fn is_match(pattern: &str, word: &str) -> Result<bool, MorphError> {
    Ok(compile(pattern)?.is_match(word))
}

/// An absent (empty) gate or the universal wildcard.
pub(crate) fn is_wildcard(pattern: &str) -> bool {
    pattern.is_empty() || pattern == WILDCARD_PATTERN
}
