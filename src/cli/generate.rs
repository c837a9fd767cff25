use clap::Args;

use crate::cli::options::SolverOptions;
use crate::cli::OutputFormat;
use crate::core::combination::Combination;
use crate::core::types::SortOrder;
use crate::utils::validation::validate_name;

#[derive(Args)]
pub struct GenerateArgs {
    /// Name to spell (1-20 characters)
    #[arg(required = true)]
    pub name: String,

    /// Order combinations by total price
    #[arg(short, long, value_enum, default_value = "asc")]
    pub sort: SortOrder,

    /// Number of combinations to show (0 for all)
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    #[command(flatten)]
    pub solver: SolverOptions,
}

/// Execute generate subcommand
///
/// # Errors
///
/// Returns an error if the name is invalid, the catalog or resolver cannot be
/// set up, or the runtime cannot be created.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: GenerateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let name = validate_name(&args.name)?;
    let generator = args.solver.build_generator()?;

    if verbose {
        eprintln!(
            "Loaded catalog with {} stickers, spelling '{name}'",
            generator.catalog().len()
        );
    }

    let rt = tokio::runtime::Runtime::new()?;
    let combinations = rt.block_on(generator.generate(&name, args.sort));

    if combinations.is_empty() {
        eprintln!("No sticker combinations spell '{name}'.");
        return Ok(());
    }

    let shown = if args.limit == 0 {
        &combinations[..]
    } else {
        &combinations[..args.limit.min(combinations.len())]
    };

    match format {
        OutputFormat::Text => print_text_results(&name, shown, combinations.len(), args.sort),
        OutputFormat::Json => print_json_results(&name, shown, combinations.len())?,
        OutputFormat::Tsv => print_tsv_results(shown),
    }

    Ok(())
}

fn print_text_results(name: &str, combinations: &[Combination], total: usize, sort: SortOrder) {
    println!("Sticker combinations for '{name}'");
    println!("{}", "=".repeat(60));
    println!(
        "Showing {} of {} combinations (sorted: {sort})",
        combinations.len(),
        total
    );

    for (i, combo) in combinations.iter().enumerate() {
        println!(
            "\n#{}  ${:.2}  [{}]",
            i + 1,
            combo.total_price.unwrap_or(0.0),
            combo.segments.join("|")
        );

        let prices = combo.prices.as_deref().unwrap_or(&[]);
        for (j, sticker) in combo.stickers.iter().enumerate() {
            let segment = combo.segments.get(j).map_or("", String::as_str);
            match prices.get(j) {
                Some(quote) => println!(
                    "  {}. {:<45} {:<10} ${:.2}{}",
                    j + 1,
                    sticker.full_name,
                    format!("\"{segment}\""),
                    quote.amount,
                    if quote.fallback { " (fallback)" } else { "" }
                ),
                None => println!("  {}. {:<45} \"{segment}\"", j + 1, sticker.full_name),
            }
        }
    }
}

fn print_json_results(name: &str, combinations: &[Combination], total: usize) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "name": name,
        "total_count": total,
        "combinations": combinations,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(combinations: &[Combination]) {
    println!("rank\ttotal_price\tsegments\tstickers\tprices");
    for (i, combo) in combinations.iter().enumerate() {
        let stickers: Vec<&str> = combo.stickers.iter().map(|s| s.full_name.as_str()).collect();
        let prices: Vec<String> = combo
            .prices
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|p| format!("{:.2}", p.amount))
            .collect();

        println!(
            "{}\t{:.2}\t{}\t{}\t{}",
            i + 1,
            combo.total_price.unwrap_or(0.0),
            combo.segments.join("|"),
            stickers.join(";"),
            prices.join(";"),
        );
    }
}
