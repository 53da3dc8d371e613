#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Free-form US address search.
//!
//! Turns an arbitrary user-typed address ("7 westerfield dr",
//! "20 Overbrook Ct #F, Monroe, OH 45050") into values a search service can
//! run against an address table:
//!
//! - [`decompose`]: structured components (house number, street, city,
//!   state, ZIP).
//! - [`expand_variants`]: every abbreviation spelling worth trying
//!   ("dr" / "drive"), and [`strip_unit_designator`] for retrying without
//!   "Apt 5" / "#F".
//! - [`build_predicate`]: a word-conjunctive, field-disjunctive substring
//!   predicate, compiled to parameterized SQL by [`predicate::to_sql`].
//!
//! Everything here is pure and synchronous. The only shared state is the
//! [`AbbreviationTable`], which is read-only once built.
//!
//! # Usage
//!
//! ```rust
//! use street_search_address::{decompose, expand_variants};
//!
//! let parsed = decompose("20 Overbrook Ct, Monroe, OH 45050");
//! assert_eq!(parsed.state.as_deref(), Some("OH"));
//!
//! let variants = expand_variants("7 westerfield dr");
//! assert!(variants.contains(&"7 westerfield drive".to_string()));
//! ```

pub mod abbreviations;
pub mod config;
pub mod decompose;
pub mod normalize;
pub mod predicate;
pub mod states;
pub mod unit;
pub mod variants;

pub use abbreviations::{AbbreviationError, AbbreviationTable};
pub use config::{ConfigError, build_table, load_config, parse_config};
pub use decompose::{AddressDecomposer, decompose};
pub use predicate::{SqlFilter, build_predicate};
pub use street_search_address_models::{
    AbbreviationCategory, AddressRecord, AddressSearchConfig, ColumnConfig, DictionaryEntry,
    ParsedAddress, QueryVariantSet, SearchField, SearchPredicate, WordPattern,
};
pub use unit::{extract_unit_designator, strip_unit_designator};
pub use variants::{VariantExpander, expand_variants};

/// All address search operations bound to one abbreviation table and one
/// set of store column names.
#[derive(Debug, Clone)]
pub struct AddressSearch {
    table: AbbreviationTable,
    columns: ColumnConfig,
}

impl Default for AddressSearch {
    fn default() -> Self {
        Self {
            table: AbbreviationTable::standard().clone(),
            columns: ColumnConfig::default(),
        }
    }
}

impl AddressSearch {
    /// Builds a search context from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Abbreviation`] if the configuration's extra
    /// dictionary entries conflict with the standard dictionary.
    pub fn from_config(config: &AddressSearchConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            table: build_table(config)?,
            columns: config.columns.clone(),
        })
    }

    #[must_use]
    pub const fn table(&self) -> &AbbreviationTable {
        &self.table
    }

    #[must_use]
    pub const fn columns(&self) -> &ColumnConfig {
        &self.columns
    }

    /// See [`AddressDecomposer::decompose`].
    #[must_use]
    pub fn decompose(&self, query: &str) -> ParsedAddress {
        AddressDecomposer::new(&self.table).decompose(query)
    }

    /// See [`VariantExpander::expand`].
    #[must_use]
    pub fn expand_variants(&self, query: &str) -> QueryVariantSet {
        VariantExpander::new(&self.table).expand(query)
    }

    /// See [`strip_unit_designator`].
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn strip_unit_designator(&self, query: &str) -> String {
        strip_unit_designator(query)
    }

    /// See [`build_predicate`].
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn build_predicate(&self, query: &str) -> SearchPredicate {
        build_predicate(query)
    }

    /// Builds the predicate for `query` and compiles it against the
    /// configured columns, with placeholders starting at `$start_idx`.
    #[must_use]
    pub fn sql_filter(&self, query: &str, start_idx: u32) -> SqlFilter {
        predicate::to_sql(&build_predicate(query), &self.columns, start_idx)
    }
}
