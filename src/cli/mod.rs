//! Command-line interface for sticker-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **generate**: Spell a name from stickers and rank the combinations by price
//! - **search**: List the combinations for a name without pricing them
//! - **catalog**: List, show, or export stickers from the catalog
//! - **price**: Resolve the price of a single sticker label
//! - **serve**: Start the HTTP API
//!
//! ## Usage
//!
//! ```text
//! # Cheapest ways to spell "navi"
//! sticker-solver generate navi
//!
//! # Most expensive first, prices from a local table
//! sticker-solver generate navi --sort desc --prices table --price-table prices.json
//!
//! # JSON output for scripting
//! sticker-solver generate navi --format json
//!
//! # Start the API
//! sticker-solver serve --port 8080
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod generate;
pub mod options;
pub mod price;
pub mod search;

#[derive(Parser)]
#[command(name = "sticker-solver")]
#[command(version)]
#[command(about = "Spell names out of stickers and rank the combinations by price")]
#[command(
    long_about = "sticker-solver finds every way to spell a name using sticker names from a catalog.\n\nEach sticker covers a leading part of its own name, up to five stickers per combination. Combinations are then priced sticker by sticker and ordered by total price."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Spell a name from stickers and rank by total price
    Generate(generate::GenerateArgs),

    /// List combinations for a name without pricing
    Search(search::SearchArgs),

    /// Inspect the sticker catalog
    Catalog(catalog::CatalogArgs),

    /// Resolve the price of one sticker label
    Price(price::PriceArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "STICKER_SOLVER_PORT")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1", env = "STICKER_SOLVER_ADDRESS")]
    pub address: String,

    #[command(flatten)]
    pub solver: options::SolverOptions,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
