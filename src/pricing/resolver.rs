use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::combination::PriceQuote;
use crate::pricing::market::market_search_url;

/// Failures inside a resolver. These never cross [`PriceResolver::resolve`];
/// they are logged and replaced by the fallback quote.
#[derive(Error, Debug)]
pub enum PricingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid market URL: {0}")]
    InvalidUrl(String),

    #[error("No price found for '{0}'")]
    NoPrice(String),

    #[error("Listing request for '{0}' ran out of time")]
    Timeout(String),

    #[error("Failed to read price table: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse price table: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Resolves a price for a sticker label.
///
/// `resolve` must always produce a usable quote. Implementations absorb their
/// own failures and return [`PriceQuote::fallback`] instead.
#[async_trait]
pub trait PriceResolver: Send + Sync {
    async fn resolve(&self, label: &str) -> PriceQuote;

    /// Resolve with a time budget, falling back once it runs out.
    ///
    /// The default spends the budget on the whole `resolve` call. Resolvers
    /// that queue their own requests override this so only the outbound work
    /// counts against the budget, not time spent waiting their turn.
    async fn resolve_within(&self, label: &str, budget: Duration) -> PriceQuote {
        match tokio::time::timeout(budget, self.resolve(label)).await {
            Ok(quote) => quote,
            Err(_) => {
                tracing::warn!(
                    "Price lookup for {label} timed out after {}ms, using fallback",
                    budget.as_millis()
                );
                PriceQuote::fallback(label, market_search_url(label))
            }
        }
    }

    /// Drop any cached prices
    fn clear_cache(&self) {}

    /// Number of cached prices
    fn cache_size(&self) -> usize {
        0
    }
}

/// Resolver that never looks anything up. Every label gets the fallback quote.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackResolver;

#[async_trait]
impl PriceResolver for FallbackResolver {
    async fn resolve(&self, label: &str) -> PriceQuote {
        PriceQuote::fallback(label, market_search_url(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::combination::FALLBACK_AMOUNT;

    #[tokio::test]
    async fn test_fallback_resolver() {
        let quote = FallbackResolver.resolve("Sticker | NaVi | Paris 2023").await;
        assert!(quote.fallback);
        assert!((quote.amount - FALLBACK_AMOUNT).abs() < f64::EPSILON);
        assert!(quote.source_url.starts_with("https://"));
        assert_eq!(FallbackResolver.cache_size(), 0);
    }

    struct Stalled;

    #[async_trait]
    impl PriceResolver for Stalled {
        async fn resolve(&self, label: &str) -> PriceQuote {
            tokio::time::sleep(Duration::from_secs(5)).await;
            PriceQuote::new(label, 9.0, "")
        }
    }

    #[tokio::test]
    async fn test_resolve_within_falls_back_when_budget_runs_out() {
        let quote = Stalled
            .resolve_within("Sticker | Slow | Paris 2023", Duration::from_millis(20))
            .await;
        assert!(quote.fallback);
        assert_eq!(quote.label, "Sticker | Slow | Paris 2023");
    }
}
