//! Word and whitespace normalization shared by every lookup.
//!
//! Dictionary lookups never normalize implicitly: callers run a word
//! through [`normalize_word`] first, so "Dr.", "DR" and "dr" all reach the
//! table as `"dr"`.

use regex::Regex;
use std::sync::LazyLock;

/// Regex to collapse runs of whitespace into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Regex for a comma that is followed by more commas (with optional
/// whitespace in between).
static DOUBLE_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(?:\s*,)+").expect("valid regex"));

/// Regex for whitespace immediately before a comma.
static SPACE_BEFORE_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+,").expect("valid regex"));

/// Normalizes a single word for dictionary lookup.
///
/// Lower-cases and strips trailing periods. Leading/trailing whitespace is
/// trimmed as well so that tokens can be passed straight from a split.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.trim().trim_end_matches('.').to_lowercase()
}

/// Splits a query into whitespace-separated words.
#[must_use]
pub fn tokenize(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

/// Collapses repeated whitespace to a single space and trims.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE_RE.replace_all(input, " ").trim().to_string()
}

/// Cleans up the punctuation left behind after removing text from an
/// address: repeated commas, space before commas, repeated whitespace,
/// and leading/trailing commas.
#[must_use]
pub fn tidy_commas(input: &str) -> String {
    let collapsed = DOUBLE_COMMA_RE.replace_all(input, ",");
    let attached = SPACE_BEFORE_COMMA_RE.replace_all(&collapsed, ",");
    let spaced = collapse_whitespace(&attached);
    spaced
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}
