#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for free-form address search.
//!
//! This crate contains only data types, configuration structs, and simple
//! conversions. It has no heavyweight dependencies (no regex, no I/O).

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which partition of the abbreviation dictionary a canonical word
/// belongs to.
///
/// Directional words are only substituted in prefix positions, never
/// treated as the street-type boundary of an address.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AbbreviationCategory {
    /// Thoroughfare suffix (Drive, Road, Street, ...).
    StreetType,
    /// Compass direction (North, Southwest, ...).
    Directional,
}

/// One dictionary row: a canonical word and its recognized spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Fully expanded spelling (e.g., `"drive"`).
    pub canonical: String,
    /// Abbreviated spellings (e.g., `["dr", "dr."]`). The canonical word
    /// does not need to be repeated here.
    #[serde(default)]
    pub forms: Vec<String>,
}

/// A free-form address decomposed into its components.
///
/// Every field is best-effort; an absent field is how the decomposer
/// signals that it could not find that component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// The input exactly as given.
    pub raw: String,
    /// House number (`"123"`, `"123A"`, `"123-125"`).
    pub house_number: Option<String>,
    /// Street name including its suffix (e.g., `"Overbrook Ct"`).
    pub street: Option<String>,
    /// Unit designator found in the street (e.g., `"#F"`, `"Apt 5"`).
    pub unit: Option<String>,
    /// The street with any unit designator removed.
    pub unit_free_street: Option<String>,
    /// City (or any place name that is not a state or ZIP).
    pub city: Option<String>,
    /// Two-letter USPS state or territory code, upper-cased.
    pub state: Option<String>,
    /// Five-digit ZIP code.
    pub zip: Option<String>,
    /// ZIP+4 extension, when present.
    pub zip4: Option<String>,
}

impl ParsedAddress {
    /// Creates a parsed address with only `raw` populated.
    #[must_use]
    pub fn empty(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if no component was recognized.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.house_number.is_none()
            && self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip.is_none()
    }
}

/// Deduplicated candidate query strings derived from one input query.
///
/// Keeps first-discovery order. The original query is always the first
/// element, so the set is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryVariantSet {
    variants: Vec<String>,
}

impl QueryVariantSet {
    /// Creates a set seeded with the original query.
    #[must_use]
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            variants: vec![original.into()],
        }
    }

    /// Adds a variant. Returns `false` if it was already present.
    pub fn insert(&mut self, variant: impl Into<String>) -> bool {
        let variant = variant.into();
        if self.variants.contains(&variant) {
            return false;
        }
        self.variants.push(variant);
        true
    }

    /// The query the set was seeded with.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.variants[0]
    }

    #[must_use]
    pub fn contains(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.variants
    }
}

impl IntoIterator for QueryVariantSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.into_iter()
    }
}

/// A text field of the address store that a search word may match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SearchField {
    /// House number column.
    HouseNumber,
    /// Street name column.
    Street,
    /// City column.
    City,
    /// County / district column.
    County,
    /// Postal code column.
    Zip,
    /// House number and street joined by a single space.
    HouseNumberStreet,
}

impl SearchField {
    /// The fixed field list every predicate targets, in order.
    pub const ALL: &[Self] = &[
        Self::HouseNumber,
        Self::Street,
        Self::City,
        Self::County,
        Self::Zip,
        Self::HouseNumberStreet,
    ];
}

/// One search word and its wildcard-wrapped substring pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPattern {
    /// The word as typed.
    pub word: String,
    /// `%word%`, with `%`, `_` and `\` in the word escaped by `\`.
    pub pattern: String,
}

impl WordPattern {
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        let mut pattern = String::with_capacity(word.len() + 2);
        pattern.push('%');
        for c in word.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Self { word, pattern }
    }
}

/// Token-conjunctive, field-disjunctive substring match.
///
/// Semantically `AND` over `words` of `OR` over `fields` of
/// "field contains word, ignoring case". No words means match everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPredicate {
    /// One conjunct per query word, in query order.
    pub words: Vec<WordPattern>,
    /// Fields each word is tried against.
    pub fields: Vec<SearchField>,
}

impl SearchPredicate {
    /// Returns `true` if the predicate places no constraint on records.
    #[must_use]
    pub fn is_match_all(&self) -> bool {
        self.words.is_empty()
    }

    /// Evaluates the predicate against an in-memory record.
    #[must_use]
    pub fn matches(&self, record: &AddressRecord) -> bool {
        let values: Vec<String> = self
            .fields
            .iter()
            .map(|field| record.field_value(*field).to_lowercase())
            .collect();

        self.words.iter().all(|word| {
            let needle = word.word.to_lowercase();
            values.iter().any(|value| value.contains(&needle))
        })
    }
}

/// A row of the address store, as seen by the predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub house_number: String,
    pub street: String,
    pub city: String,
    pub county: String,
    pub zip: String,
}

impl AddressRecord {
    /// Returns the text of `field` for this record.
    #[must_use]
    pub fn field_value(&self, field: SearchField) -> Cow<'_, str> {
        match field {
            SearchField::HouseNumber => Cow::Borrowed(&self.house_number),
            SearchField::Street => Cow::Borrowed(&self.street),
            SearchField::City => Cow::Borrowed(&self.city),
            SearchField::County => Cow::Borrowed(&self.county),
            SearchField::Zip => Cow::Borrowed(&self.zip),
            SearchField::HouseNumberStreet => {
                Cow::Owned(format!("{} {}", self.house_number, self.street))
            }
        }
    }
}

/// Column names of the backing address table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub house_number: String,
    pub street: String,
    pub city: String,
    pub county: String,
    pub zip: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            house_number: "house_number".to_string(),
            street: "street".to_string(),
            city: "city".to_string(),
            county: "county".to_string(),
            zip: "zip".to_string(),
        }
    }
}

/// Quotes `name` as a SQL identifier, doubling any embedded `"`.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl ColumnConfig {
    /// SQL expression that yields the text of `field`. Column names are
    /// always emitted as quoted identifiers.
    #[must_use]
    pub fn expression(&self, field: SearchField) -> String {
        match field {
            SearchField::HouseNumber => quote_identifier(&self.house_number),
            SearchField::Street => quote_identifier(&self.street),
            SearchField::City => quote_identifier(&self.city),
            SearchField::County => quote_identifier(&self.county),
            SearchField::Zip => quote_identifier(&self.zip),
            SearchField::HouseNumberStreet => format!(
                "CONCAT_WS(' ', {}, {})",
                quote_identifier(&self.house_number),
                quote_identifier(&self.street)
            ),
        }
    }
}

/// Top-level configuration file for address search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressSearchConfig {
    /// Column names used when compiling predicates to SQL.
    pub columns: ColumnConfig,
    /// Street-type entries added to the standard dictionary.
    pub extra_street_types: Vec<DictionaryEntry>,
    /// Directional entries added to the standard dictionary.
    pub extra_directionals: Vec<DictionaryEntry>,
}
