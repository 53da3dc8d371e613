//! Subcommand implementations. Each returns the pretty JSON to print.

use serde::Serialize;
use street_search_address::{AbbreviationCategory, AddressSearch};

type JsonResult = Result<String, serde_json::Error>;

#[derive(Serialize)]
struct StripUnitOutput<'a> {
    input: &'a str,
    unit: Option<String>,
    stripped: String,
}

#[derive(Serialize)]
struct SqlOutput {
    clause: String,
    params: Vec<String>,
    next_idx: u32,
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    word: &'a str,
    canonical: Option<&'a str>,
    category: Option<AbbreviationCategory>,
    variants: Vec<String>,
}

pub fn parse(search: &AddressSearch, address: &str) -> JsonResult {
    serde_json::to_string_pretty(&search.decompose(address))
}

pub fn variants(search: &AddressSearch, query: &str) -> JsonResult {
    serde_json::to_string_pretty(&search.expand_variants(query))
}

pub fn strip_unit(search: &AddressSearch, address: &str) -> JsonResult {
    serde_json::to_string_pretty(&StripUnitOutput {
        input: address,
        unit: street_search_address::extract_unit_designator(address),
        stripped: search.strip_unit_designator(address),
    })
}

pub fn predicate(search: &AddressSearch, query: &str, sql: bool, start_idx: u32) -> JsonResult {
    if !sql {
        return serde_json::to_string_pretty(&search.build_predicate(query));
    }

    let filter = search.sql_filter(query, start_idx);
    log::debug!("Compiled {} parameter(s) for '{query}'", filter.params.len());
    serde_json::to_string_pretty(&SqlOutput {
        clause: filter.clause,
        params: filter.params,
        next_idx: filter.next_idx,
    })
}

pub fn lookup(search: &AddressSearch, word: &str) -> JsonResult {
    let table = search.table();
    let canonical = table.canonical_of(word);
    serde_json::to_string_pretty(&LookupOutput {
        word,
        canonical,
        category: canonical.and_then(|c| table.category_of(c)),
        variants: table.variants_of(word),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(output: &str) -> serde_json::Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn parse_prints_components() {
        let search = AddressSearch::default();
        let value = json(&parse(&search, "20 Overbrook Ct, Monroe, OH 45050").unwrap());
        assert_eq!(value["house_number"], "20");
        assert_eq!(value["street"], "Overbrook Ct");
        assert_eq!(value["city"], "Monroe");
        assert_eq!(value["state"], "OH");
        assert_eq!(value["zip"], "45050");
        assert!(value["unit"].is_null());
    }

    #[test]
    fn variants_prints_a_list() {
        let value = json(&variants(&AddressSearch::default(), "7 westerfield dr").unwrap());
        let list = value.as_array().unwrap();
        assert_eq!(list[0], "7 westerfield dr");
        assert!(list.iter().any(|v| v == "7 westerfield drive"));
    }

    #[test]
    fn strip_unit_reports_removed_designator() {
        let search = AddressSearch::default();
        let value = json(&strip_unit(&search, "20 Overbrook Ct #F, Monroe, OH 45050").unwrap());
        assert_eq!(value["unit"], "#F");
        assert_eq!(value["stripped"], "20 Overbrook Ct, Monroe, OH 45050");
    }

    #[test]
    fn predicate_prints_words_and_fields() {
        let value = json(&predicate(&AddressSearch::default(), "Oakley 2525", false, 1).unwrap());
        assert_eq!(value["words"][0]["pattern"], "%Oakley%");
        assert_eq!(value["fields"][5], "house_number_street");
    }

    #[test]
    fn predicate_sql_prints_bound_params() {
        let value = json(&predicate(&AddressSearch::default(), "Oakley 2525", true, 1).unwrap());
        assert_eq!(value["params"][1], "%2525%");
        assert_eq!(value["next_idx"], 3);
    }

    #[test]
    fn lookup_prints_category_and_variants() {
        let value = json(&lookup(&AddressSearch::default(), "NW").unwrap());
        assert_eq!(value["canonical"], "northwest");
        assert_eq!(value["category"], "directional");
        assert_eq!(value["variants"][1], "nw");

        let value = json(&lookup(&AddressSearch::default(), "Oakley").unwrap());
        assert!(value["canonical"].is_null());
        assert_eq!(value["variants"][0], "Oakley");
    }
}
