use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::options::CatalogOptions;
use crate::cli::OutputFormat;
use crate::core::sticker::Sticker;
use crate::core::types::Rarity;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all stickers in the catalog
    List {
        #[command(flatten)]
        catalog: CatalogOptions,

        /// Filter by tournament (substring, case-insensitive)
        #[arg(long)]
        tournament: Option<String>,

        /// Filter by rarity (paper, holo, glitter, gold, foil, lenticular)
        #[arg(long)]
        rarity: Option<String>,
    },

    /// Show details of a specific sticker
    Show {
        /// Full sticker label
        #[arg(required = true)]
        label: String,

        #[command(flatten)]
        catalog: CatalogOptions,
    },

    /// List stickers whose name starts with a letter
    Letter {
        /// First character of the sticker name
        #[arg(required = true)]
        letter: char,

        #[command(flatten)]
        catalog: CatalogOptions,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path. If not specified, prints to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        catalog: CatalogOptions,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, a sticker is not found,
/// or the export cannot be written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            tournament,
            rarity,
        } => run_list(
            &catalog,
            tournament.as_deref(),
            rarity.as_deref(),
            format,
            verbose,
        ),
        CatalogCommands::Show { label, catalog } => run_show(&label, &catalog, format),
        CatalogCommands::Letter { letter, catalog } => run_letter(letter, &catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, &catalog),
    }
}

fn run_list(
    options: &CatalogOptions,
    tournament_filter: Option<&str>,
    rarity_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = options.load()?;

    if verbose {
        eprintln!("Loaded catalog with {} stickers", catalog.len());
    }

    let rarity_filter = match rarity_filter {
        Some(tag) if tag.trim().eq_ignore_ascii_case("paper") => Some(Rarity::Paper),
        Some(tag) => Some(
            Rarity::parse(tag).ok_or_else(|| anyhow::anyhow!("Unknown rarity '{tag}'"))?,
        ),
        None => None,
    };

    let filtered: Vec<&Sticker> = catalog
        .stickers
        .iter()
        .filter(|s| {
            if let Some(tournament) = tournament_filter {
                if !s
                    .tournament
                    .to_lowercase()
                    .contains(&tournament.to_lowercase())
                {
                    return false;
                }
            }
            rarity_filter.map_or(true, |r| s.rarity == r)
        })
        .collect();

    print_stickers(&format!("Sticker Catalog ({} stickers)", filtered.len()), &filtered, format)
}

fn run_show(label: &str, options: &CatalogOptions, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = options.load()?;
    let sticker = catalog
        .get(label)
        .ok_or_else(|| anyhow::anyhow!("Sticker '{label}' not found"))?;

    match format {
        OutputFormat::Text => {
            println!("Sticker: {}\n", sticker.full_name);
            println!("Name:       {}", sticker.extracted_name);
            println!("Match key:  {}", sticker.match_key);
            println!("Rarity:     {}", sticker.rarity);
            if !sticker.tournament.is_empty() {
                println!("Tournament: {}", sticker.tournament);
            }
            println!(
                "\nMarket: {}",
                crate::pricing::market::market_search_url(&sticker.full_name)
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(sticker)?),
        OutputFormat::Tsv => {
            println!("full_name\textracted_name\tmatch_key\trarity\ttournament");
            println!(
                "{}\t{}\t{}\t{}\t{}",
                sticker.full_name,
                sticker.extracted_name,
                sticker.match_key,
                sticker.rarity,
                sticker.tournament
            );
        }
    }

    Ok(())
}

fn run_letter(letter: char, options: &CatalogOptions, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = options.load()?;
    let matches = catalog.find_by_letter(letter);

    print_stickers(
        &format!("Stickers starting with '{letter}' ({})", matches.len()),
        &matches,
        format,
    )
}

fn run_export(output: Option<PathBuf>, options: &CatalogOptions) -> anyhow::Result<()> {
    let catalog = options.load()?;
    let json = catalog.to_json()?;

    if let Some(path) = output {
        std::fs::write(&path, json)?;
        println!("Exported {} stickers to {}", catalog.len(), path.display());
    } else {
        println!("{json}");
    }

    Ok(())
}

fn print_stickers(title: &str, stickers: &[&Sticker], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let name_width = stickers
                .iter()
                .map(|s| s.extracted_name.chars().count().min(30))
                .max()
                .unwrap_or(4)
                .max(4);

            println!("{title}\n");
            println!(
                "{:<name_w$} {:<10} Label",
                "Name",
                "Rarity",
                name_w = name_width
            );
            println!("{}", "-".repeat(name_width + 60));
            for s in stickers {
                println!(
                    "{:<name_w$} {:<10} {}",
                    truncate(&s.extracted_name, name_width),
                    s.rarity.to_string(),
                    s.full_name,
                    name_w = name_width
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stickers)?),
        OutputFormat::Tsv => {
            println!("full_name\textracted_name\trarity\ttournament");
            for s in stickers {
                println!(
                    "{}\t{}\t{}\t{}",
                    s.full_name, s.extracted_name, s.rarity, s.tournament
                );
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
