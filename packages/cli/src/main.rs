#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for inspecting how free-form addresses are parsed and searched.
//!
//! ```text
//! street_search parse "20 Overbrook Ct #F, Monroe, OH 45050"
//! street_search variants "7 westerfield dr"
//! street_search strip-unit "20 Overbrook Ct #F, Monroe, OH 45050"
//! street_search predicate "Oakley 2525" --sql
//! street_search lookup dr
//! ```
//!
//! Every command prints pretty JSON. Pass `--config <path>` to load extra
//! dictionary entries and store column names from a TOML file.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use street_search_address::{AddressSearch, load_config};

#[derive(Parser)]
#[command(
    name = "street_search",
    about = "Parse free-form addresses and build fuzzy search queries"
)]
struct Cli {
    /// TOML configuration file (extra abbreviations, column names)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompose an address into house number, street, city, state and ZIP
    Parse {
        /// Address text
        address: String,
    },
    /// List the abbreviation variants of a query
    Variants {
        /// Query text
        query: String,
    },
    /// Remove apartment/suite/unit designators from an address
    StripUnit {
        /// Address text
        address: String,
    },
    /// Build the multi-field search predicate for a query
    Predicate {
        /// Query text
        query: String,
        /// Print the compiled SQL filter instead of the predicate
        #[arg(long)]
        sql: bool,
        /// First `$n` placeholder index for the SQL filter
        #[arg(long, default_value = "1")]
        start_idx: u32,
    },
    /// Look up a word in the abbreviation table
    Lookup {
        /// Street type or directional word (e.g., "dr", "North")
        word: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let search = match &cli.config {
        Some(path) => AddressSearch::from_config(&load_config(path)?)?,
        None => AddressSearch::default(),
    };

    let output = match cli.command {
        Commands::Parse { address } => commands::parse(&search, &address)?,
        Commands::Variants { query } => commands::variants(&search, &query)?,
        Commands::StripUnit { address } => commands::strip_unit(&search, &address)?,
        Commands::Predicate {
            query,
            sql,
            start_idx,
        } => commands::predicate(&search, &query, sql, start_idx)?,
        Commands::Lookup { word } => commands::lookup(&search, &word)?,
    };

    println!("{output}");
    Ok(())
}
