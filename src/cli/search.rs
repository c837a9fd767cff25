use clap::Args;

use crate::cli::options::{CatalogOptions, SearchOptions};
use crate::cli::OutputFormat;
use crate::matching::engine::SegmentationEngine;
use crate::utils::validation::validate_name;

#[derive(Args)]
pub struct SearchArgs {
    /// Name to spell (1-20 characters)
    #[arg(required = true)]
    pub name: String,

    #[command(flatten)]
    pub catalog: CatalogOptions,

    #[command(flatten)]
    pub search: SearchOptions,
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the name is invalid or the catalog cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let name = validate_name(&args.name)?;
    let catalog = args.catalog.load()?;

    if verbose {
        eprintln!("Loaded catalog with {} stickers", catalog.len());
    }

    let engine = SegmentationEngine::with_config(&catalog, args.search.to_config());
    let combinations = engine.search(&name);

    match format {
        OutputFormat::Text => {
            println!("{} combinations spell '{name}'", combinations.len());
            for (i, combo) in combinations.iter().enumerate() {
                let stickers: Vec<&str> =
                    combo.stickers.iter().map(|s| s.full_name.as_str()).collect();
                println!(
                    "{:>4}. [{}] {}",
                    i + 1,
                    combo.segments.join("|"),
                    stickers.join(" + ")
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input_name": name,
                "combinations_count": combinations.len(),
                "combinations": combinations,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("index\tsegments\tstickers\texact");
            for (i, combo) in combinations.iter().enumerate() {
                let stickers: Vec<&str> =
                    combo.stickers.iter().map(|s| s.full_name.as_str()).collect();
                println!(
                    "{}\t{}\t{}\t{}",
                    i + 1,
                    combo.segments.join("|"),
                    stickers.join(";"),
                    combo.is_exact()
                );
            }
        }
    }

    Ok(())
}
