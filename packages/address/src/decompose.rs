//! Free-form address decomposition.
//!
//! Splits a user-typed address into house number, street, city, state and
//! ZIP. Input is formatted inconsistently ("City, ST Zip", "City ST, Zip",
//! no punctuation at all), so there are two strategies:
//!
//! - **Comma path**: the first segment is the street, the last segment is
//!   searched for state/ZIP, and what lies between is the city.
//! - **Space path**: tokens are peeled off right to left (ZIP, state), then
//!   the house number from the left, and the rest is split into street and
//!   city at the rightmost street-type word.
//!
//! Decomposition never fails. A component that cannot be identified is
//! left as `None`.

use regex::Regex;
use std::sync::LazyLock;

use street_search_address_models::ParsedAddress;

use crate::abbreviations::AbbreviationTable;
use crate::normalize::tokenize;
use crate::states::is_state_code;
use crate::unit::{extract_unit_designator, strip_unit_designator};

/// Regex for a ZIP (or ZIP+4) at the very end of a segment.
static ZIP_TAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(\d{5})(?:-(\d{4}))?$").expect("valid regex"));

/// Regex for a house number token: `123`, `123A`, `123-125`.
static HOUSE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[A-Za-z]?(?:-\d+)?$").expect("valid regex"));

/// State/ZIP found at the end of a segment, plus the text before them.
#[derive(Debug, Default)]
struct Administrative {
    zip: Option<String>,
    zip4: Option<String>,
    state: Option<String>,
    rest: String,
}

impl Administrative {
    const fn found(&self) -> bool {
        self.zip.is_some() || self.state.is_some()
    }
}

/// Pulls a trailing ZIP and then a trailing state code off `segment`.
fn extract_administrative(segment: &str) -> Administrative {
    let mut admin = Administrative::default();
    let mut rest = segment.trim();

    if let Some(caps) = ZIP_TAIL_RE.captures(rest) {
        admin.zip = caps.get(1).map(|m| m.as_str().to_string());
        admin.zip4 = caps.get(2).map(|m| m.as_str().to_string());
        let start = caps.get(0).map_or(rest.len(), |m| m.start());
        rest = rest[..start].trim_end();
    }

    let (head, last) = rest
        .rsplit_once(char::is_whitespace)
        .unwrap_or(("", rest));
    if is_state_code(last) {
        admin.state = Some(last.to_ascii_uppercase());
        rest = head.trim_end();
    }

    admin.rest = rest.to_string();
    admin
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Returns `true` if `token` looks like a house number.
#[must_use]
pub fn is_house_number(token: &str) -> bool {
    HOUSE_NUMBER_RE.is_match(token)
}

/// Address decomposer bound to an abbreviation table.
#[derive(Debug, Clone, Copy)]
pub struct AddressDecomposer<'a> {
    table: &'a AbbreviationTable,
}

impl Default for AddressDecomposer<'static> {
    fn default() -> Self {
        Self::new(AbbreviationTable::standard())
    }
}

impl<'a> AddressDecomposer<'a> {
    #[must_use]
    pub const fn new(table: &'a AbbreviationTable) -> Self {
        Self { table }
    }

    /// Decomposes `input` into its components.
    #[must_use]
    pub fn decompose(&self, input: &str) -> ParsedAddress {
        let mut parsed = ParsedAddress::empty(input);

        if input.contains(',') {
            Self::decompose_comma_delimited(input, &mut parsed);
        } else {
            self.decompose_space_delimited(input, &mut parsed);
        }

        if let Some(street) = &parsed.street {
            if parsed.unit.is_none() {
                parsed.unit = extract_unit_designator(street);
            }
            parsed.unit_free_street = non_empty(strip_unit_designator(street));
        }

        log::trace!("decompose: '{input}' -> {parsed:?}");
        parsed
    }

    /// Splits a leading house number off the street segment.
    fn apply_street_segment(segment: &str, parsed: &mut ParsedAddress) {
        let segment = segment.trim();
        match segment.split_once(char::is_whitespace) {
            Some((first, rest)) if is_house_number(first) => {
                parsed.house_number = Some(first.to_string());
                parsed.street = non_empty(rest);
            }
            None if is_house_number(segment) => {
                parsed.house_number = Some(segment.to_string());
            }
            _ => parsed.street = non_empty(segment),
        }
    }

    /// Non-empty city segments. A segment holding only a unit designator
    /// becomes `parsed.unit` instead.
    fn city_segments(segments: &[&str], parsed: &mut ParsedAddress) -> Vec<String> {
        let mut city = Vec::with_capacity(segments.len());
        for segment in segments {
            if strip_unit_designator(segment).is_empty() {
                parsed.unit.get_or_insert_with(|| (*segment).to_string());
            } else {
                city.push((*segment).to_string());
            }
        }
        city
    }

    fn decompose_comma_delimited(input: &str, parsed: &mut ParsedAddress) {
        let segments: Vec<&str> = input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let Some(first) = segments.first() else {
            return;
        };
        Self::apply_street_segment(first, parsed);

        if segments.len() < 2 {
            return;
        }

        let last_idx = segments.len() - 1;
        let last = extract_administrative(segments[last_idx]);

        if last.found() {
            log::trace!("decompose: administrative tail in last segment: {last:?}");
            parsed.zip = last.zip;
            parsed.zip4 = last.zip4;
            parsed.state = last.state;

            let mut middle = Self::city_segments(&segments[1..last_idx], parsed);

            // "City ST, Zip": the state sits at the end of the city segment.
            if parsed.state.is_none()
                && let Some(tail) = middle.last_mut()
            {
                let admin = extract_administrative(tail);
                if admin.state.is_some() {
                    parsed.state = admin.state;
                    if parsed.zip.is_none() {
                        parsed.zip = admin.zip;
                        parsed.zip4 = admin.zip4;
                    }
                    *tail = admin.rest;
                }
            }

            middle.retain(|s| !s.trim().is_empty());
            parsed.city = if middle.is_empty() {
                non_empty(last.rest)
            } else {
                non_empty(middle.join(", "))
            };
            return;
        }

        if last_idx == 1 {
            parsed.city = non_empty(segments[1]);
            return;
        }

        // Nothing administrative at the end ("..., Columbus OH, USA"): the
        // second-to-last segment is the city, possibly carrying state/ZIP.
        let second = extract_administrative(segments[last_idx - 1]);
        log::trace!("decompose: falling back to second-to-last segment: {second:?}");
        if second.found() {
            parsed.zip = second.zip;
            parsed.zip4 = second.zip4;
            parsed.state = second.state;
            parsed.city = non_empty(second.rest);
            // "..., Columbus, OH 43215, USA": the city is its own segment.
            if parsed.city.is_none() {
                let city = Self::city_segments(&segments[1..last_idx - 1], parsed);
                parsed.city = non_empty(city.join(", "));
            }
        } else {
            parsed.city = non_empty(segments[last_idx - 1]);
        }
    }

    fn is_directional_word(&self, word: &str) -> bool {
        self.table
            .canonical_of(word)
            .is_some_and(|canonical| self.table.is_directional(canonical))
    }

    fn decompose_space_delimited(&self, input: &str, parsed: &mut ParsedAddress) {
        let mut tokens = tokenize(input);

        if let Some(&last) = tokens.last()
            && let Some(caps) = ZIP_TAIL_RE.captures(last)
        {
            parsed.zip = caps.get(1).map(|m| m.as_str().to_string());
            parsed.zip4 = caps.get(2).map(|m| m.as_str().to_string());
            tokens.pop();
        }

        // "CT" is Connecticut and "Ct" is Court. Without a ZIP before it, an
        // ambiguous trailing token is a street type.
        if tokens.len() >= 2
            && let Some(&last) = tokens.last()
            && is_state_code(last)
        {
            let ambiguous = self.table.is_street_type_word(last);
            if !ambiguous || parsed.zip.is_some() {
                parsed.state = Some(last.to_ascii_uppercase());
                tokens.pop();
            } else {
                log::trace!("decompose: '{last}' treated as street type, not state");
            }
        }

        if let Some(&first) = tokens.first()
            && is_house_number(first)
        {
            parsed.house_number = Some(first.to_string());
            tokens.remove(0);
        }

        let mut remainder = tokens.join(" ");
        if let Some(unit) = extract_unit_designator(&remainder) {
            parsed.unit = Some(unit);
            remainder = strip_unit_designator(&remainder);
        }
        let tokens = tokenize(&remainder);
        if tokens.is_empty() {
            return;
        }

        // A suffix needs a name before it, so position 0 never ends a street.
        // Directionals never mark the boundary: "Main St N Canton" is
        // "Main St" in North Canton.
        let boundary = (1..tokens.len())
            .rev()
            .find(|&i| self.table.is_street_suffix(tokens[i]));

        let street = match boundary {
            Some(i) => {
                let rest = &tokens[i + 1..];
                if rest.iter().all(|token| self.is_directional_word(token)) {
                    // Post-directional ("Main St NE"), not a city.
                    tokens.join(" ")
                } else {
                    parsed.city = Some(rest.join(" "));
                    tokens[..=i].join(" ")
                }
            }
            None if parsed.house_number.is_some() => tokens.join(" "),
            None => {
                parsed.city = Some(tokens.join(" "));
                return;
            }
        };

        // The unit stays on the street, as it does on the comma path.
        parsed.street = Some(match &parsed.unit {
            Some(unit) => format!("{street} {unit}"),
            None => street,
        });
    }
}

/// Decomposes `input` using the standard abbreviation table.
#[must_use]
pub fn decompose(input: &str) -> ParsedAddress {
    AddressDecomposer::default().decompose(input)
}
