use serde::{Deserialize, Serialize};

use crate::core::sticker::Sticker;

/// Currency every quote is expressed in
pub const DEFAULT_CURRENCY: &str = "USD";

/// Amount used when a price cannot be determined
pub const FALLBACK_AMOUNT: f64 = 0.05;

/// A resolved price for one sticker label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Label the quote was resolved for
    pub label: String,

    /// Price in `currency`, never negative
    pub amount: f64,

    pub currency: String,

    /// Where the price can be checked by hand. Informational only.
    pub source_url: String,

    /// True when `amount` is the fallback rather than an observed price
    #[serde(default)]
    pub fallback: bool,
}

impl PriceQuote {
    pub fn new(label: impl Into<String>, amount: f64, source_url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.max(0.0),
            currency: DEFAULT_CURRENCY.to_string(),
            source_url: source_url.into(),
            fallback: false,
        }
    }

    /// The quote used whenever a resolver cannot produce a real price
    pub fn fallback(label: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            fallback: true,
            ..Self::new(label, FALLBACK_AMOUNT, source_url)
        }
    }
}

/// One way of spelling the target out of catalog stickers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Normalized (lower-cased) target this combination spells
    pub target: String,

    /// Stickers in spelling order
    pub stickers: Vec<Sticker>,

    /// The slice of `target` each sticker stands for, same order.
    /// Each segment is a prefix of its sticker's match key.
    pub segments: Vec<String>,

    /// One quote per sticker, same order. Set by enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<PriceQuote>>,

    /// Sum of `prices`. Set by enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
}

impl Combination {
    /// Create a combination where every sticker covers its whole match key
    pub fn new(target: impl Into<String>, stickers: Vec<Sticker>) -> Self {
        let segments = stickers.iter().map(|s| s.match_key.clone()).collect();
        Self::with_segments(target, stickers, segments)
    }

    pub fn with_segments(
        target: impl Into<String>,
        stickers: Vec<Sticker>,
        segments: Vec<String>,
    ) -> Self {
        debug_assert_eq!(stickers.len(), segments.len());
        Self {
            target: target.into(),
            stickers,
            segments,
            prices: None,
            total_price: None,
        }
    }

    /// Concatenated match keys of the stickers, in order
    pub fn spelled(&self) -> String {
        self.stickers.iter().map(|s| s.match_key.as_str()).collect()
    }

    /// Concatenated segments. Always equals `target` for search results.
    pub fn covered(&self) -> String {
        self.segments.concat()
    }

    /// True when every sticker's whole match key is used by its segment
    pub fn is_exact(&self) -> bool {
        self.stickers
            .iter()
            .zip(&self.segments)
            .all(|(sticker, segment)| sticker.match_key == *segment)
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    pub fn is_enriched(&self) -> bool {
        self.prices.is_some() && self.total_price.is_some()
    }

    /// Attach quotes and compute the total.
    ///
    /// `prices` must be in sticker order.
    pub fn set_prices(&mut self, prices: Vec<PriceQuote>) {
        debug_assert_eq!(prices.len(), self.stickers.len());
        self.total_price = Some(prices.iter().map(|p| p.amount).sum());
        self.prices = Some(prices);
    }
}
