//! TOML configuration loading.
//!
//! ```toml
//! [columns]
//! zip = "postal_code"
//!
//! [[extra_street_types]]
//! canonical = "esplanade"
//! forms = ["espl"]
//! ```

use std::path::Path;

use street_search_address_models::{AbbreviationCategory, AddressSearchConfig};

use crate::abbreviations::{AbbreviationError, AbbreviationTable};

/// Errors from loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The extra dictionary entries conflict with the standard table.
    #[error("Abbreviation error: {0}")]
    Abbreviation(#[from] AbbreviationError),
}

/// Parses a configuration document.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the document is not valid TOML or does
/// not match the configuration schema.
pub fn parse_config(text: &str) -> Result<AddressSearchConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, or
/// [`ConfigError::Parse`] if it is malformed.
pub fn load_config(path: impl AsRef<Path>) -> Result<AddressSearchConfig, ConfigError> {
    let path = path.as_ref();
    log::debug!("Loading address search config from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

/// Builds an abbreviation table from the standard dictionaries plus the
/// extra entries in `config`.
///
/// # Errors
///
/// Returns [`ConfigError::Abbreviation`] if an extra entry registers a
/// surface form that already belongs to another canonical word.
pub fn build_table(config: &AddressSearchConfig) -> Result<AbbreviationTable, ConfigError> {
    if config.extra_street_types.is_empty() && config.extra_directionals.is_empty() {
        return Ok(AbbreviationTable::standard().clone());
    }

    Ok(AbbreviationTable::standard_builder()?
        .with_entries(
            AbbreviationCategory::StreetType,
            config.extra_street_types.iter().cloned(),
        )
        .with_entries(
            AbbreviationCategory::Directional,
            config.extra_directionals.iter().cloned(),
        )
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AddressSearchConfig::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(matches!(
            parse_config("extra_street_types = \"espl\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_config("/nonexistent/street_search.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn extra_entries_extend_standard_table() {
        let config = parse_config(
            r#"
            [[extra_street_types]]
            canonical = "esplanade"
            forms = ["espl"]
            "#,
        )
        .unwrap();
        let table = build_table(&config).unwrap();
        assert_eq!(table.canonical_of("espl"), Some("esplanade"));
        assert_eq!(table.canonical_of("dr"), Some("drive"));
    }

    #[test]
    fn conflicting_extra_entry_is_rejected() {
        let config = parse_config(
            r#"
            [[extra_directionals]]
            canonical = "northbound"
            forms = ["n"]
            "#,
        )
        .unwrap();
        assert!(matches!(
            build_table(&config),
            Err(ConfigError::Abbreviation(
                AbbreviationError::DuplicateSurfaceForm { .. }
            ))
        ));
    }
}
