use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use crate::core::combination::PriceQuote;
use crate::pricing::market::market_search_url;
use crate::pricing::resolver::{PriceResolver, PricingError};

/// Offline resolver backed by a fixed `label -> amount` table.
///
/// The table file is a JSON object:
///
/// ```json
/// { "Sticker | NaVi | Paris 2023": 0.12, "Sticker | G2 | Paris 2023": 0.08 }
/// ```
///
/// Labels missing from the table get the fallback quote.
#[derive(Debug, Default, Clone)]
pub struct TablePriceResolver {
    prices: HashMap<String, f64>,
}

impl TablePriceResolver {
    pub fn new(prices: HashMap<String, f64>) -> Self {
        Self { prices }
    }

    /// Parse a price table from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an object of label -> number.
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let prices: HashMap<String, f64> = serde_json::from_str(json)?;
        Ok(Self::new(prices))
    }

    /// Load a price table from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, PricingError> {
        let content = std::fs::read_to_string(path)?;
        let resolver = Self::from_json(&content)?;
        tracing::info!(
            "Loaded {} prices from {}",
            resolver.len(),
            path.display()
        );
        Ok(resolver)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl PriceResolver for TablePriceResolver {
    async fn resolve(&self, label: &str) -> PriceQuote {
        let source_url = market_search_url(label);
        match self.prices.get(label) {
            Some(&amount) if amount.is_finite() => PriceQuote::new(label, amount, source_url),
            _ => {
                tracing::debug!("No table price for {label}, using fallback");
                PriceQuote::fallback(label, source_url)
            }
        }
    }
}
