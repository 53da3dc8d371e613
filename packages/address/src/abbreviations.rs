//! Street type and directional abbreviation table.
//!
//! Maps every canonical word ("drive") to its ordered surface forms
//! (`["drive", "dr", "dr."]`) and every surface form back to its canonical
//! word. The standard table is built once from the dictionaries under
//! `dictionaries/` and is read-only afterwards.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;
use street_search_address_models::{AbbreviationCategory, DictionaryEntry};

use crate::normalize::normalize_word;

const STREET_TYPES_TOML: &str = include_str!("../dictionaries/street_types.toml");
const DIRECTIONALS_TOML: &str = include_str!("../dictionaries/directionals.toml");

static STANDARD: LazyLock<AbbreviationTable> = LazyLock::new(|| {
    AbbreviationTable::standard_builder()
        .and_then(TableBuilder::build)
        .unwrap_or_else(|e| panic!("Invalid standard abbreviation dictionary: {e}"))
});

/// Errors from building an abbreviation table.
#[derive(Debug, thiserror::Error)]
pub enum AbbreviationError {
    /// The same surface form was registered under two canonical words,
    /// which would make reverse lookup ambiguous.
    #[error("Surface form '{form}' registered under both '{first}' and '{second}'")]
    DuplicateSurfaceForm {
        /// Normalized surface form.
        form: String,
        /// Canonical word that registered it first.
        first: String,
        /// Canonical word that tried to register it again.
        second: String,
    },

    /// An entry had an empty canonical word or an empty surface form.
    #[error("Empty surface form in entry '{canonical}'")]
    EmptyForm {
        /// Canonical word of the offending entry.
        canonical: String,
    },

    /// A dictionary document could not be parsed.
    #[error("Dictionary parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct DictionaryFile {
    entries: Vec<DictionaryEntry>,
}

/// One canonical word with its category and surface forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationEntry {
    /// Normalized canonical word.
    pub canonical: String,
    /// Street type or directional.
    pub category: AbbreviationCategory,
    /// Surface forms, canonical first. Forms keep their trailing period
    /// (`"dr."`) since they are substituted back into queries verbatim.
    pub forms: Vec<String>,
}

/// Accumulates dictionary entries before the reverse index is built.
#[derive(Debug, Default)]
pub struct TableBuilder {
    entries: Vec<(AbbreviationCategory, DictionaryEntry)>,
}

impl TableBuilder {
    /// Adds entries under `category`.
    #[must_use]
    pub fn with_entries(
        mut self,
        category: AbbreviationCategory,
        entries: impl IntoIterator<Item = DictionaryEntry>,
    ) -> Self {
        self.entries
            .extend(entries.into_iter().map(|entry| (category, entry)));
        self
    }

    /// Parses a dictionary document and adds its entries under `category`.
    ///
    /// # Errors
    ///
    /// Returns [`AbbreviationError::Parse`] if the document is malformed.
    pub fn with_toml(
        self,
        category: AbbreviationCategory,
        text: &str,
    ) -> Result<Self, AbbreviationError> {
        let file: DictionaryFile = toml::from_str(text)?;
        Ok(self.with_entries(category, file.entries))
    }

    /// Builds the table and its reverse index.
    ///
    /// Entries that repeat a canonical word are merged into the first
    /// entry for that word.
    ///
    /// # Errors
    ///
    /// Returns [`AbbreviationError::DuplicateSurfaceForm`] if a surface form
    /// normalizes to the same key under two different canonical words, or
    /// [`AbbreviationError::EmptyForm`] for an empty word.
    pub fn build(self) -> Result<AbbreviationTable, AbbreviationError> {
        let mut entries: Vec<AbbreviationEntry> = Vec::with_capacity(self.entries.len());
        let mut by_canonical: BTreeMap<String, usize> = BTreeMap::new();
        let mut reverse: BTreeMap<String, usize> = BTreeMap::new();

        for (category, entry) in self.entries {
            let canonical = normalize_word(&entry.canonical);
            if canonical.is_empty() {
                return Err(AbbreviationError::EmptyForm {
                    canonical: entry.canonical,
                });
            }

            let idx = *by_canonical.entry(canonical.clone()).or_insert_with(|| {
                entries.push(AbbreviationEntry {
                    canonical: canonical.clone(),
                    category,
                    forms: Vec::new(),
                });
                entries.len() - 1
            });

            let surface_forms = std::iter::once(canonical.as_str())
                .chain(entry.forms.iter().map(String::as_str));

            for form in surface_forms {
                let display = form.trim().to_lowercase();
                let key = normalize_word(&display);
                if key.is_empty() {
                    return Err(AbbreviationError::EmptyForm {
                        canonical: canonical.clone(),
                    });
                }

                match reverse.get(&key) {
                    Some(&existing) if existing != idx => {
                        return Err(AbbreviationError::DuplicateSurfaceForm {
                            form: key,
                            first: entries[existing].canonical.clone(),
                            second: canonical.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        reverse.insert(key, idx);
                    }
                }

                if !entries[idx].forms.contains(&display) {
                    entries[idx].forms.push(display);
                }
            }
        }

        log::debug!(
            "Built abbreviation table: {} canonical words, {} surface keys",
            entries.len(),
            reverse.len()
        );

        Ok(AbbreviationTable {
            entries,
            by_canonical,
            reverse,
        })
    }
}

/// Bidirectional canonical ⇄ abbreviation dictionary.
///
/// Every lookup normalizes its argument with [`normalize_word`], so
/// lookups are case-insensitive and ignore a trailing period.
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    entries: Vec<AbbreviationEntry>,
    by_canonical: BTreeMap<String, usize>,
    reverse: BTreeMap<String, usize>,
}

impl AbbreviationTable {
    /// Returns the process-wide table built from the embedded
    /// dictionaries.
    ///
    /// # Panics
    ///
    /// Panics on first use if an embedded dictionary is malformed or
    /// registers a surface form twice.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Returns a builder preloaded with the embedded dictionaries, for
    /// callers that want to add their own entries.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded dictionary cannot be parsed.
    pub fn standard_builder() -> Result<TableBuilder, AbbreviationError> {
        TableBuilder::default()
            .with_toml(AbbreviationCategory::StreetType, STREET_TYPES_TOML)?
            .with_toml(AbbreviationCategory::Directional, DIRECTIONALS_TOML)
    }

    /// Builds a table from explicit entries.
    ///
    /// # Errors
    ///
    /// See [`TableBuilder::build`].
    pub fn from_entries(
        entries: impl IntoIterator<Item = (AbbreviationCategory, DictionaryEntry)>,
    ) -> Result<Self, AbbreviationError> {
        TableBuilder {
            entries: entries.into_iter().collect(),
        }
        .build()
    }

    fn lookup(&self, word: &str) -> Option<&AbbreviationEntry> {
        let key = normalize_word(word);
        self.reverse.get(&key).map(|&idx| &self.entries[idx])
    }

    /// Returns every surface form of the canonical word `word` belongs to.
    ///
    /// Unknown words are returned unchanged as a single-element list.
    #[must_use]
    pub fn variants_of(&self, word: &str) -> Vec<String> {
        self.lookup(word)
            .map_or_else(|| vec![word.to_string()], |entry| entry.forms.clone())
    }

    /// Returns `true` if `word` is a known canonical word or surface form
    /// of either category.
    #[must_use]
    pub fn is_street_type_word(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    /// Returns `true` if `word` is a street type. Directionals are not.
    #[must_use]
    pub fn is_street_suffix(&self, word: &str) -> bool {
        self.lookup(word)
            .is_some_and(|entry| entry.category == AbbreviationCategory::StreetType)
    }

    /// Returns the canonical word for `word`, if known.
    #[must_use]
    pub fn canonical_of(&self, word: &str) -> Option<&str> {
        self.lookup(word).map(|entry| entry.canonical.as_str())
    }

    /// Returns the canonical form of a known word, or the normalized word
    /// itself.
    #[must_use]
    pub fn expand(&self, word: &str) -> String {
        self.canonical_of(word)
            .map_or_else(|| normalize_word(word), str::to_string)
    }

    /// Returns `true` if `canonical` is a directional canonical word.
    #[must_use]
    pub fn is_directional(&self, canonical: &str) -> bool {
        self.category_of(canonical) == Some(AbbreviationCategory::Directional)
    }

    /// Category of the canonical word `canonical`.
    #[must_use]
    pub fn category_of(&self, canonical: &str) -> Option<AbbreviationCategory> {
        self.by_canonical
            .get(&normalize_word(canonical))
            .map(|&idx| self.entries[idx].category)
    }

    /// All entries, in dictionary order.
    pub fn entries(&self) -> impl Iterator<Item = &AbbreviationEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(canonical: &str, forms: &[&str]) -> DictionaryEntry {
        DictionaryEntry {
            canonical: canonical.to_string(),
            forms: forms.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn standard_table_builds() {
        let table = AbbreviationTable::standard();
        assert!(!table.is_empty());
        assert!(table.entries().any(|e| e.canonical == "drive"));
    }

    #[test]
    fn variants_of_canonical_word() {
        let table = AbbreviationTable::standard();
        assert_eq!(table.variants_of("drive"), vec!["drive", "dr", "dr.", "drv"]);
    }

    #[test]
    fn variants_of_surface_form_is_its_canonical_list() {
        let table = AbbreviationTable::standard();
        assert_eq!(table.variants_of("Dr."), table.variants_of("drive"));
        assert_eq!(table.variants_of("DR"), table.variants_of("drive"));
    }

    #[test]
    fn variants_of_unknown_word_is_itself() {
        let table = AbbreviationTable::standard();
        assert_eq!(table.variants_of("Westerfield"), vec!["Westerfield"]);
    }

    #[test]
    fn variants_contain_normalized_form_of_known_words() {
        let table = AbbreviationTable::standard();
        for entry in table.entries() {
            for form in &entry.forms {
                let variants = table.variants_of(form);
                assert!(
                    variants.contains(form),
                    "{form} missing from its own variants {variants:?}"
                );
            }
        }
    }

    #[test]
    fn every_surface_form_maps_back_to_its_canonical() {
        let table = AbbreviationTable::standard();
        for entry in table.entries() {
            assert_eq!(entry.forms[0], entry.canonical);
            for form in &entry.forms {
                assert_eq!(
                    table.canonical_of(form),
                    Some(entry.canonical.as_str()),
                    "{form} should map to {}",
                    entry.canonical
                );
            }
        }
    }

    #[test]
    fn lookups_ignore_case_and_trailing_period() {
        let table = AbbreviationTable::standard();
        assert_eq!(table.canonical_of("ST."), Some("street"));
        assert_eq!(table.canonical_of("Blvd"), Some("boulevard"));
        assert_eq!(table.canonical_of("N."), Some("north"));
        assert_eq!(table.canonical_of("main"), None);
    }

    #[test]
    fn identifies_street_type_words_of_both_categories() {
        let table = AbbreviationTable::standard();
        assert!(table.is_street_type_word("Ct"));
        assert!(table.is_street_type_word("court"));
        assert!(table.is_street_type_word("NW"));
        assert!(!table.is_street_type_word("Monroe"));

        assert!(table.is_street_suffix("Ct"));
        assert!(table.is_street_suffix("rdg"));
        assert!(!table.is_street_suffix("NW"));
        assert!(!table.is_street_suffix("Monroe"));
    }

    #[test]
    fn directional_category_is_separate() {
        let table = AbbreviationTable::standard();
        assert!(table.is_directional("north"));
        assert!(table.is_directional("southwest"));
        assert!(!table.is_directional("street"));
        assert!(!table.is_directional("n"));
        assert_eq!(
            table.category_of("avenue"),
            Some(AbbreviationCategory::StreetType)
        );
    }

    #[test]
    fn expands_known_words_only() {
        let table = AbbreviationTable::standard();
        assert_eq!(table.expand("Pkwy."), "parkway");
        assert_eq!(table.expand("Oakley"), "oakley");
    }

    #[test]
    fn canonical_is_first_even_when_not_listed() {
        let table = AbbreviationTable::from_entries([(
            AbbreviationCategory::StreetType,
            entry("Esplanade", &["espl"]),
        )])
        .unwrap();
        assert_eq!(table.variants_of("espl"), vec!["esplanade", "espl"]);
    }

    #[test]
    fn rejects_surface_form_under_two_canonicals() {
        let result = AbbreviationTable::from_entries([
            (AbbreviationCategory::StreetType, entry("street", &["st"])),
            (AbbreviationCategory::StreetType, entry("saint", &["St."])),
        ]);
        match result {
            Err(AbbreviationError::DuplicateSurfaceForm {
                form,
                first,
                second,
            }) => {
                assert_eq!(form, "st");
                assert_eq!(first, "street");
                assert_eq!(second, "saint");
            }
            other => panic!("expected duplicate surface form error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_forms() {
        let result = AbbreviationTable::from_entries([(
            AbbreviationCategory::StreetType,
            entry("road", &["rd", " "]),
        )]);
        assert!(matches!(result, Err(AbbreviationError::EmptyForm { .. })));
    }

    #[test]
    fn merges_repeated_canonical_entries() {
        let table = AbbreviationTable::standard_builder()
            .unwrap()
            .with_entries(
                AbbreviationCategory::StreetType,
                [entry("street", &["stree"])],
            )
            .build()
            .unwrap();
        assert_eq!(table.canonical_of("stree"), Some("street"));
        assert!(table.variants_of("st").contains(&"stree".to_string()));
    }

    #[test]
    fn rejects_malformed_dictionary() {
        let result =
            TableBuilder::default().with_toml(AbbreviationCategory::Directional, "entries = 3");
        assert!(matches!(result, Err(AbbreviationError::Parse(_))));
    }
}
