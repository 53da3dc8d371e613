//! Apartment / suite / unit designator removal.
//!
//! A unit-qualified address ("20 Overbrook Ct #F") often has no exact
//! counterpart in the store, so callers retry with the base street
//! address. Only values shaped like a real unit identifier are removed:
//! digits with an optional letter, a `#`-prefixed token, or a single bare
//! letter. "Ste. Genevieve" is a place name, not "Suite Genevieve".

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::tidy_commas;

/// Regex for one unit designator, including the comma or whitespace that
/// separates it from the preceding text.
///
/// Numeric values are capped at four digits so a state code followed by a
/// ZIP ("FL 33601") is never taken for "Floor 33601".
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        (?:\s*,)?\s*
        (?:
            \#[a-z0-9]+(?:-[a-z0-9]+)?
          |
            \b(?:apt|apartment|ste|suite|unit|bldg|building|fl|floor|rm|room)\b\.?\s*
            (?:
                \#\s*[a-z0-9]+(?:-[a-z0-9]+)?
              | \d{1,4}[a-z]?(?:-\d{1,4})?
              | [a-z]
            )\b
        )",
    )
    .expect("valid regex")
});

fn strip_once(input: &str) -> String {
    tidy_commas(&UNIT_RE.replace_all(input, ""))
}

/// Removes every unit designator from `address` and tidies the commas and
/// whitespace left behind.
///
/// Idempotent: stripping is repeated until nothing changes, so removing
/// one designator can never expose another on a second call.
#[must_use]
pub fn strip_unit_designator(address: &str) -> String {
    let mut current = strip_once(address);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        log::trace!("strip_unit_designator: second pass '{current}' -> '{next}'");
        current = next;
    }
}

/// Returns the first unit designator in `address` (e.g., `"#F"`,
/// `"Apt 5"`), without its leading separator.
#[must_use]
pub fn extract_unit_designator(address: &str) -> Option<String> {
    UNIT_RE.find(address).map(|m| {
        m.as_str()
            .trim_start_matches(|c: char| c == ',' || c.is_whitespace())
            .to_string()
    })
}
