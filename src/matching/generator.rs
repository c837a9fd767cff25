use std::sync::Arc;

use crate::catalog::store::StickerCatalog;
use crate::core::combination::Combination;
use crate::core::types::SortOrder;
use crate::matching::engine::{SearchConfig, SegmentationEngine};
use crate::matching::enrich::{EnrichConfig, Enricher};
use crate::pricing::resolver::PriceResolver;

/// Search plus enrichment over a shared catalog and resolver.
///
/// This is what request handlers and the CLI call. The catalog is read-only and
/// shared between concurrent requests without locking.
pub struct NameGenerator {
    catalog: Arc<StickerCatalog>,
    search_config: SearchConfig,
    enricher: Enricher,
}

impl NameGenerator {
    pub fn new(catalog: Arc<StickerCatalog>, resolver: Arc<dyn PriceResolver>) -> Self {
        Self::with_config(
            catalog,
            resolver,
            SearchConfig::default(),
            EnrichConfig::default(),
        )
    }

    pub fn with_config(
        catalog: Arc<StickerCatalog>,
        resolver: Arc<dyn PriceResolver>,
        search_config: SearchConfig,
        enrich_config: EnrichConfig,
    ) -> Self {
        Self {
            catalog,
            search_config,
            enricher: Enricher::with_config(resolver, enrich_config),
        }
    }

    pub fn catalog(&self) -> &StickerCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &Arc<dyn PriceResolver> {
        self.enricher.resolver()
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search_config
    }

    pub fn enrich_config(&self) -> &EnrichConfig {
        self.enricher.config()
    }

    /// Combinations for `target` without prices
    pub fn search_only(&self, target: &str) -> Vec<Combination> {
        SegmentationEngine::with_config(&self.catalog, self.search_config.clone()).search(target)
    }

    /// Combinations for `target`, priced and ordered by total
    pub async fn generate(&self, target: &str, sort: SortOrder) -> Vec<Combination> {
        let combinations = self.search_only(target);
        tracing::info!(
            "Generated {} combinations for '{}', resolving prices",
            combinations.len(),
            target
        );
        self.enricher.enrich(combinations, sort).await
    }
}
