//! Default fragment predicates
//!
//! Generated class names and ids (`css-175oi2r`, `sc-bdVaJa`) make brittle
//! selectors. The defaults only accept tokens that look like words.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_LIKE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[a-z\-]{3,}$").unwrap());
static WORD_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-|[A-Z]").unwrap());
static CONSONANT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[^aeiou]{4,}").unwrap());

/// Attribute names accepted by `accept_attr`, besides `data-*`
pub const ACCEPTED_ATTR_NAMES: &[&str] = &["role", "name", "aria-label", "rel", "href"];

/// Values at or above this length are rejected by `accept_attr`
pub const MAX_ATTR_VALUE_LEN: usize = 100;

/// Check if `name` looks like a human-chosen word.
///
/// Letters and hyphens only, at least three characters, and every piece
/// split at hyphens and uppercase letters is longer than two characters
/// with no run of four or more non-vowels.
pub fn word_like(name: &str) -> bool {
    if !WORD_LIKE_RE.is_match(name) {
        return false;
    }
    WORD_SPLIT_RE
        .split(name)
        .all(|word| word.len() > 2 && !CONSONANT_RUN_RE.is_match(word))
}

/// Default tag predicate: every tag is usable
pub fn accept_tag(_name: &str) -> bool {
    true
}

/// Default attribute predicate
pub fn accept_attr(name: &str, value: &str) -> bool {
    let name_ok = ACCEPTED_ATTR_NAMES.contains(&name) || name.starts_with("data-");
    let value_ok = (word_like(value) && value.len() < MAX_ATTR_VALUE_LEN)
        || value.strip_prefix('#').is_some_and(word_like);
    name_ok && value_ok
}
