//! Query variant expansion.
//!
//! The store is not assumed to normalize abbreviations, so "7 westerfield
//! dr" may only exist as "7 westerfield drive". The expander rewrites the
//! positions where a street type or directional usually appears with each
//! known spelling:
//!
//! - the last and second-to-last words (street type, possibly followed by
//!   a unit: "123 main st unit 5");
//! - the first three words, directionals only ("N Main St").
//!
//! Each position is substituted independently against the original query.

use street_search_address_models::QueryVariantSet;

use crate::abbreviations::AbbreviationTable;
use crate::normalize::tokenize;

/// How many leading words are checked for directionals.
pub const DIRECTIONAL_PREFIX_POSITIONS: usize = 3;

/// Query variant expander bound to an abbreviation table.
#[derive(Debug, Clone, Copy)]
pub struct VariantExpander<'a> {
    table: &'a AbbreviationTable,
}

impl Default for VariantExpander<'static> {
    fn default() -> Self {
        Self::new(AbbreviationTable::standard())
    }
}

impl<'a> VariantExpander<'a> {
    #[must_use]
    pub const fn new(table: &'a AbbreviationTable) -> Self {
        Self { table }
    }

    /// Returns the lower-cased query followed by every abbreviation
    /// variant, deduplicated in first-discovery order.
    #[must_use]
    pub fn expand(&self, query: &str) -> QueryVariantSet {
        let lowered = tokenize(&query.to_lowercase()).join(" ");
        let tokens = tokenize(&lowered);
        let mut variants = QueryVariantSet::new(lowered.clone());

        let len = tokens.len();
        for position in [len.checked_sub(1), len.checked_sub(2)]
            .into_iter()
            .flatten()
        {
            self.substitute(&tokens, position, &mut variants);
        }

        for position in 0..len.min(DIRECTIONAL_PREFIX_POSITIONS) {
            let is_directional = self
                .table
                .canonical_of(tokens[position])
                .is_some_and(|canonical| self.table.is_directional(canonical));
            if is_directional {
                self.substitute(&tokens, position, &mut variants);
            }
        }

        log::trace!("expand_variants: '{query}' -> {} variant(s)", variants.len());
        variants
    }

    /// Adds one variant per surface form of the word at `position`.
    fn substitute(&self, tokens: &[&str], position: usize, variants: &mut QueryVariantSet) {
        let forms = self.table.variants_of(tokens[position]);
        if forms.len() < 2 {
            return;
        }

        for form in &forms {
            let rewritten: Vec<&str> = tokens
                .iter()
                .enumerate()
                .map(|(i, &token)| if i == position { form.as_str() } else { token })
                .collect();
            variants.insert(rewritten.join(" "));
        }
    }
}

/// Expands `query` using the standard abbreviation table.
#[must_use]
pub fn expand_variants(query: &str) -> Vec<String> {
    VariantExpander::default().expand(query).into_vec()
}
