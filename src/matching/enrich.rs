use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::core::combination::{Combination, PriceQuote};
use crate::core::types::SortOrder;
use crate::pricing::resolver::PriceResolver;

/// Default number of resolver calls allowed in flight at once
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Default time a single resolver call may take before its fallback is used
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for price enrichment
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Resolver calls in flight across all combinations
    pub max_concurrency: usize,
    /// Time budget handed to each resolver call; an exhausted budget gets the
    /// fallback quote. Resolvers that queue requests internally only count
    /// their outbound work against it.
    pub call_timeout: Duration,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

/// Attaches prices to combinations and ranks them by total
pub struct Enricher {
    resolver: Arc<dyn PriceResolver>,
    limiter: Semaphore,
    config: EnrichConfig,
}

impl Enricher {
    pub fn new(resolver: Arc<dyn PriceResolver>) -> Self {
        Self::with_config(resolver, EnrichConfig::default())
    }

    pub fn with_config(resolver: Arc<dyn PriceResolver>, config: EnrichConfig) -> Self {
        Self {
            resolver,
            limiter: Semaphore::new(config.max_concurrency.max(1)),
            config,
        }
    }

    pub fn resolver(&self) -> &Arc<dyn PriceResolver> {
        &self.resolver
    }

    pub fn config(&self) -> &EnrichConfig {
        &self.config
    }

    /// Price every combination, then order them by total.
    ///
    /// All combinations are enriched concurrently; the semaphore bounds how many
    /// resolver calls run at once.
    pub async fn enrich(&self, combinations: Vec<Combination>, sort: SortOrder) -> Vec<Combination> {
        let count = combinations.len();
        let enriched = join_all(combinations.into_iter().map(|c| self.enrich_one(c))).await;
        tracing::debug!("Enriched {count} combinations");
        rank(enriched, sort)
    }

    /// Resolve a quote for every sticker in one combination and wait for all of
    /// them before computing the total. Quotes stay in sticker order.
    pub async fn enrich_one(&self, mut combination: Combination) -> Combination {
        let quotes = join_all(combination.stickers.iter().map(|s| self.quote(s.label()))).await;
        combination.set_prices(quotes);
        combination
    }

    async fn quote(&self, label: &str) -> PriceQuote {
        // The semaphore is never closed, so acquire only waits
        let _permit = self.limiter.acquire().await.ok();
        self.resolver
            .resolve_within(label, self.config.call_timeout)
            .await
    }
}

fn total(combination: &Combination) -> f64 {
    combination.total_price.unwrap_or(0.0)
}

/// Order combinations by total price. The sort is stable, so ties keep their
/// search order; `SortOrder::None` keeps search order entirely.
#[must_use]
pub fn rank(mut combinations: Vec<Combination>, sort: SortOrder) -> Vec<Combination> {
    let by_total = |a: &Combination, b: &Combination| -> Ordering { total(a).total_cmp(&total(b)) };
    match sort {
        SortOrder::Asc => combinations.sort_by(by_total),
        SortOrder::Desc => combinations.sort_by(|a, b| by_total(b, a)),
        SortOrder::None => {}
    }
    combinations
}
