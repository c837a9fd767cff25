use clap::Args;

use crate::cli::options::PricingOptions;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct PriceArgs {
    /// Full sticker label, e.g. "Sticker | NaVi | Paris 2023"
    #[arg(required = true)]
    pub label: String,

    #[command(flatten)]
    pub pricing: PricingOptions,
}

/// Execute price subcommand
///
/// # Errors
///
/// Returns an error if the resolver cannot be set up or the runtime cannot be
/// created. Lookup failures are reported as a fallback quote, not an error.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PriceArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let resolver = args.pricing.build_resolver()?;
    let config = args.pricing.to_config();

    if verbose {
        eprintln!("Resolving price for '{}' via {:?}", args.label, args.pricing.prices);
    }

    let rt = tokio::runtime::Runtime::new()?;
    let quote = rt.block_on(resolver.resolve_within(&args.label, config.call_timeout));

    match format {
        OutputFormat::Text => {
            println!("{}", quote.label);
            println!(
                "  Price: {:.2} {}{}",
                quote.amount,
                quote.currency,
                if quote.fallback { " (fallback)" } else { "" }
            );
            println!("  Market: {}", quote.source_url);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&quote)?),
        OutputFormat::Tsv => {
            println!("label\tamount\tcurrency\tfallback\tsource_url");
            println!(
                "{}\t{:.2}\t{}\t{}\t{}",
                quote.label, quote.amount, quote.currency, quote.fallback, quote.source_url
            );
        }
    }

    Ok(())
}
