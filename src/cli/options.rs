use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use crate::catalog::store::StickerCatalog;
use crate::matching::engine::{
    MatchMode, SearchConfig, DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_COMBO_SIZE, DEFAULT_MAX_RESULTS,
};
use crate::matching::enrich::{EnrichConfig, DEFAULT_MAX_CONCURRENCY};
use crate::matching::generator::NameGenerator;
use crate::pricing::market::{MarketConfig, MarketPriceResolver};
use crate::pricing::resolver::{FallbackResolver, PriceResolver};
use crate::pricing::table::TablePriceResolver;

/// Where sticker prices come from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PriceSource {
    /// Lowest listing on the public market pages
    #[default]
    Market,
    /// Fixed prices from a JSON table (--price-table)
    Table,
    /// Every sticker gets the fallback price
    Fallback,
}

/// Catalog selection shared by every subcommand
#[derive(Args, Clone, Debug, Default)]
pub struct CatalogOptions {
    /// Path to custom catalog file (JSON array of sticker labels)
    #[arg(long, env = "STICKER_SOLVER_CATALOG")]
    pub catalog: Option<PathBuf>,
}

impl CatalogOptions {
    /// Load the custom catalog if one was given, otherwise the embedded one
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read, parsed, or is empty.
    pub fn load(&self) -> anyhow::Result<StickerCatalog> {
        let catalog = if let Some(path) = &self.catalog {
            StickerCatalog::load_from_file(path)?
        } else {
            StickerCatalog::load_embedded()?
        };
        Ok(catalog)
    }
}

/// Search bounds
#[derive(Args, Clone, Debug)]
pub struct SearchOptions {
    /// Maximum stickers per combination
    #[arg(long, default_value_t = DEFAULT_MAX_COMBO_SIZE)]
    pub max_size: usize,

    /// Stickers explored per probe substring
    #[arg(long, default_value_t = DEFAULT_MAX_CANDIDATES)]
    pub max_candidates: usize,

    /// Stop after this many combinations (0 for no limit)
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// How probe substrings are matched against sticker names
    #[arg(long, value_enum, default_value = "prefix")]
    pub match_mode: MatchMode,
}

impl SearchOptions {
    pub fn to_config(&self) -> SearchConfig {
        SearchConfig {
            max_combo_size: self.max_size,
            max_candidates_per_probe: self.max_candidates,
            max_results: (self.max_results > 0).then_some(self.max_results),
            match_mode: self.match_mode,
        }
    }
}

/// Pricing options
#[derive(Args, Clone, Debug)]
pub struct PricingOptions {
    /// Price source
    #[arg(long, value_enum, default_value = "market", env = "STICKER_SOLVER_PRICES")]
    pub prices: PriceSource,

    /// JSON object of label -> price, used with --prices table
    #[arg(long, env = "STICKER_SOLVER_PRICE_TABLE")]
    pub price_table: Option<PathBuf>,

    /// Maximum price lookups in flight at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,

    /// Timeout for a single price lookup, in milliseconds
    #[arg(long, default_value = "10000")]
    pub timeout_ms: u64,

    /// Minimum delay between market requests, in milliseconds
    #[arg(long, default_value = "1000", env = "STICKER_SOLVER_REQUEST_DELAY_MS")]
    pub request_delay_ms: u64,
}

impl PricingOptions {
    pub fn to_config(&self) -> EnrichConfig {
        EnrichConfig {
            max_concurrency: self.concurrency.max(1),
            call_timeout: Duration::from_millis(self.timeout_ms),
        }
    }

    /// Build the resolver selected by `--prices`
    ///
    /// # Errors
    ///
    /// Returns an error if `--prices table` is used without a readable table, or
    /// if the HTTP client cannot be built.
    pub fn build_resolver(&self) -> anyhow::Result<Arc<dyn PriceResolver>> {
        let resolver: Arc<dyn PriceResolver> = match self.prices {
            PriceSource::Market => {
                let config = MarketConfig {
                    request_delay: Duration::from_millis(self.request_delay_ms),
                    ..MarketConfig::default()
                };
                Arc::new(MarketPriceResolver::with_config(config)?)
            }
            PriceSource::Table => {
                let path = self
                    .price_table
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("--price-table is required with --prices table"))?;
                Arc::new(TablePriceResolver::load_from_file(path)?)
            }
            PriceSource::Fallback => Arc::new(FallbackResolver),
        };
        Ok(resolver)
    }
}

/// Everything needed to build a [`NameGenerator`]
#[derive(Args, Clone, Debug)]
pub struct SolverOptions {
    #[command(flatten)]
    pub catalog: CatalogOptions,

    #[command(flatten)]
    pub search: SearchOptions,

    #[command(flatten)]
    pub pricing: PricingOptions,
}

impl SolverOptions {
    /// Load the catalog, build the resolver, and wire up a generator
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or the resolver cannot be set up.
    pub fn build_generator(&self) -> anyhow::Result<NameGenerator> {
        let catalog = self.catalog.load()?;
        tracing::debug!("Loaded catalog with {} stickers", catalog.len());

        let resolver = self.pricing.build_resolver()?;
        Ok(NameGenerator::with_config(
            Arc::new(catalog),
            resolver,
            self.search.to_config(),
            self.pricing.to_config(),
        ))
    }
}
