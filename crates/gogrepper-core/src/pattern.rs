//! Search pattern parsing
//!
//! A single line of user input describes one of three operations:
//!
//! - `expr` searches for `expr`
//! - `expr -> repl` replaces matches of `expr` with `repl`
//! - `expr -> repl!` does the same replacement in place
//!
//! Both sides are opaque gogrep expressions; only the delimiter and the
//! trailing `!` marker are interpreted here.

use crate::error::{GogrepError, Result};

/// Separates the search expression from the replacement.
pub const REPLACE_DELIMITER: &str = "->";

/// Marks a replacement that rewrites files in place.
pub const INPLACE_MARKER: char = '!';

/// Result of splitting user input into gogrep expressions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPattern {
    pub search: String,
    pub replace: String,
    pub inplace: bool,
}

impl ParsedPattern {
    pub fn is_replace(&self) -> bool {
        !self.replace.is_empty()
    }
}

/// Parse a free-text pattern.
///
/// Returns `Ok(None)` when no search expression remains after trimming;
/// callers treat that as "nothing to do" and abort without reporting.
pub fn parse(text: &str) -> Result<Option<ParsedPattern>> {
    let count = text.matches(REPLACE_DELIMITER).count();
    if count > 1 {
        return Err(GogrepError::MalformedPattern { count });
    }

    let parsed = match text.split_once(REPLACE_DELIMITER) {
        Some((search, replace)) => {
            let replace = replace.trim();
            let (replace, inplace) = match replace.strip_suffix(INPLACE_MARKER) {
                Some(stripped) => (stripped, true),
                None => (replace, false),
            };
            ParsedPattern {
                search: search.trim().to_string(),
                replace: replace.to_string(),
                inplace,
            }
        }
        None => ParsedPattern {
            search: text.trim().to_string(),
            ..ParsedPattern::default()
        },
    };

    if parsed.search.is_empty() {
        return Ok(None);
    }
    Ok(Some(parsed))
}
