//! Multi-field search predicate construction.
//!
//! Every query word must appear somewhere among the target fields, but
//! different words may match different fields. "Oakley 2525" matches a
//! record whose street contains "Oakley" and whose house number contains
//! "2525", in either order.
//!
//! The predicate is a plain value. [`to_sql`] compiles it into a
//! parameterized `WHERE` fragment; user text only ever travels as bound
//! parameter values.

use street_search_address_models::{ColumnConfig, SearchField, SearchPredicate, WordPattern};

use crate::normalize::tokenize;

/// Builds the predicate for `query`.
///
/// A query with no words yields a predicate that matches every record.
#[must_use]
pub fn build_predicate(query: &str) -> SearchPredicate {
    let words: Vec<WordPattern> = tokenize(query).into_iter().map(WordPattern::new).collect();
    log::trace!("build_predicate: '{query}' -> {} conjunct(s)", words.len());

    SearchPredicate {
        words,
        fields: SearchField::ALL.to_vec(),
    }
}

/// A compiled `WHERE` fragment and its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFilter {
    /// SQL boolean expression using `$n` placeholders.
    pub clause: String,
    /// Parameter values, in placeholder order.
    pub params: Vec<String>,
    /// Next unused placeholder index.
    pub next_idx: u32,
}

/// Compiles `predicate` into a PostgreSQL-style filter.
///
/// Each word binds one parameter, reused across its `OR` group:
///
/// ```text
/// ("street" ILIKE $1 OR "city" ILIKE $1 ...) AND ("street" ILIKE $2 OR ...)
/// ```
///
/// An empty predicate compiles to `TRUE` with no parameters.
#[must_use]
pub fn to_sql(predicate: &SearchPredicate, columns: &ColumnConfig, start_idx: u32) -> SqlFilter {
    if predicate.is_match_all() || predicate.fields.is_empty() {
        return SqlFilter {
            clause: "TRUE".to_string(),
            params: Vec::new(),
            next_idx: start_idx,
        };
    }

    let mut idx = start_idx;
    let mut frags = Vec::with_capacity(predicate.words.len());
    let mut params = Vec::with_capacity(predicate.words.len());

    for word in &predicate.words {
        let alternatives: Vec<String> = predicate
            .fields
            .iter()
            .map(|field| format!("{} ILIKE ${idx}", columns.expression(*field)))
            .collect();
        frags.push(format!("({})", alternatives.join(" OR ")));
        params.push(word.pattern.clone());
        idx += 1;
    }

    SqlFilter {
        clause: frags.join(" AND "),
        params,
        next_idx: idx,
    }
}

#[cfg(test)]
mod tests {
    use street_search_address_models::AddressRecord;

    use super::*;

    fn oakley() -> AddressRecord {
        AddressRecord {
            house_number: "2525".to_string(),
            street: "Oakley Ave".to_string(),
            city: "Cincinnati".to_string(),
            county: "Hamilton".to_string(),
            zip: "45209".to_string(),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let predicate = build_predicate("");
        assert!(predicate.words.is_empty());
        assert!(predicate.is_match_all());
        assert!(predicate.matches(&oakley()));
        assert!(predicate.matches(&AddressRecord::default()));
        assert!(build_predicate("   ").is_match_all());
    }

    #[test]
    fn one_conjunct_per_word_against_fixed_fields() {
        let predicate = build_predicate("Oakley 2525");
        assert_eq!(predicate.fields, SearchField::ALL);
        let patterns: Vec<&str> = predicate.words.iter().map(|w| w.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["%Oakley%", "%2525%"]);
    }

    #[test]
    fn words_match_any_field_in_any_order() {
        let record = oakley();
        assert!(build_predicate("Oakley 2525").matches(&record));
        assert!(build_predicate("2525 oakley").matches(&record));
        assert!(build_predicate("oak cinci 452").matches(&record));
        assert!(build_predicate("hamilton").matches(&record));
    }

    #[test]
    fn every_word_must_match() {
        let record = oakley();
        assert!(!build_predicate("Oakley 2626").matches(&record));
        assert!(!build_predicate("Dayton").matches(&record));
    }

    #[test]
    fn compiles_to_parameterized_sql() {
        let predicate = build_predicate("Oakley 2525");
        let filter = to_sql(&predicate, &ColumnConfig::default(), 1);
        assert_eq!(
            filter.clause,
            r#"("house_number" ILIKE $1 OR "street" ILIKE $1 OR "city" ILIKE $1 OR "county" ILIKE $1 OR "zip" ILIKE $1 OR CONCAT_WS(' ', "house_number", "street") ILIKE $1) AND ("house_number" ILIKE $2 OR "street" ILIKE $2 OR "city" ILIKE $2 OR "county" ILIKE $2 OR "zip" ILIKE $2 OR CONCAT_WS(' ', "house_number", "street") ILIKE $2)"#
        );
        assert_eq!(filter.params, vec!["%Oakley%", "%2525%"]);
        assert_eq!(filter.next_idx, 3);
    }

    #[test]
    fn user_text_never_reaches_the_clause() {
        let predicate = build_predicate("x'); DROP TABLE addresses; --");
        let filter = to_sql(&predicate, &ColumnConfig::default(), 1);
        assert!(!filter.clause.contains("DROP"));
        assert!(filter.params.iter().any(|p| p.contains("DROP")));
    }

    #[test]
    fn empty_predicate_compiles_to_true() {
        let filter = to_sql(&build_predicate(""), &ColumnConfig::default(), 4);
        assert_eq!(filter.clause, "TRUE");
        assert!(filter.params.is_empty());
        assert_eq!(filter.next_idx, 4);
    }

    #[test]
    fn placeholders_continue_from_start_index() {
        let filter = to_sql(&build_predicate("main"), &ColumnConfig::default(), 3);
        assert!(filter.clause.contains(r#""street" ILIKE $3"#));
        assert!(!filter.clause.contains("$4"));
        assert_eq!(filter.next_idx, 4);
    }

    #[test]
    fn uses_configured_column_names() {
        let columns = ColumnConfig {
            zip: "postal_code".to_string(),
            ..ColumnConfig::default()
        };
        let filter = to_sql(&build_predicate("45050"), &columns, 1);
        assert!(filter.clause.contains(r#""postal_code" ILIKE $1"#));
    }
}
