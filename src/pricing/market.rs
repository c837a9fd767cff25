use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Url;
use scraper::{Html, Selector};
use tokio::sync::{Mutex, OnceCell};

use crate::core::combination::PriceQuote;
use crate::pricing::cache::{PriceCache, DEFAULT_CACHE_CAPACITY};
use crate::pricing::extract::extract_price;
use crate::pricing::resolver::{PriceResolver, PricingError};

/// Market listing page for a single item; the label is appended as a path segment
pub const DEFAULT_LISTINGS_URL: &str = "https://steamcommunity.com/market/listings/730/";

/// Market search page, used for the informational link on every quote
pub const DEFAULT_SEARCH_URL: &str = "https://steamcommunity.com/market/search";

/// Minimum delay between two outbound requests
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(1000);

/// Per-request HTTP timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Elements holding the lowest listed price, most specific first
const PRICE_SELECTORS: [&str; 3] = [
    ".market_listing_price_with_fee",
    ".market_listing_price",
    ".normal_price",
];

/// Configuration for [`MarketPriceResolver`]
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub listings_url: String,
    pub search_url: String,
    pub request_delay: Duration,
    pub request_timeout: Duration,
    pub cache_capacity: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            listings_url: DEFAULT_LISTINGS_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Build the market search link for a label against the default search page
#[must_use]
pub fn market_search_url(label: &str) -> String {
    search_url_for(DEFAULT_SEARCH_URL, label)
}

fn search_url_for(base: &str, label: &str) -> String {
    Url::parse_with_params(base, &[("appid", "730"), ("q", label)])
        .map_or_else(|_| base.to_string(), String::from)
}

/// Names to try for a label: the label itself, then the bare sticker name
fn candidate_names(label: &str) -> Vec<String> {
    let simple = label.replace("Sticker | ", "").replace(" | ", " ");
    if simple == label {
        vec![label.to_string()]
    } else {
        vec![label.to_string(), simple]
    }
}

/// Find the first positive price in a market listing page
#[must_use]
pub fn parse_listing_html(html: &str) -> Option<f64> {
    let document = Html::parse_document(html);

    for selector_str in PRICE_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text: String = element.text().collect();
            if let Some(price) = extract_price(&text) {
                return Some(price);
            }
        }
    }

    None
}

/// Resolves prices from the public market listing pages.
///
/// Outbound requests are spaced at least `request_delay` apart. Concurrent
/// lookups of the same label share one fetch. Successful lookups are cached;
/// any failure produces the fallback quote.
pub struct MarketPriceResolver {
    client: reqwest::Client,
    config: MarketConfig,
    cache: PriceCache,
    last_request: Mutex<Option<Instant>>,
    in_flight: std::sync::Mutex<HashMap<String, Arc<Lookup>>>,
}

/// Outcome of one shared fetch; `None` when no price was found
type Lookup = OnceCell<Option<f64>>;

impl MarketPriceResolver {
    /// Create a resolver with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, PricingError> {
        Self::with_config(MarketConfig::default())
    }

    /// Create a resolver with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(config: MarketConfig) -> Result<Self, PricingError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            cache: PriceCache::new(config.cache_capacity),
            config,
            last_request: Mutex::new(None),
            in_flight: std::sync::Mutex::new(HashMap::new()),
        })
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    fn listing_url(&self, name: &str) -> Result<Url, PricingError> {
        let mut url = Url::parse(&self.config.listings_url)
            .map_err(|e| PricingError::InvalidUrl(format!("{}: {e}", self.config.listings_url)))?;
        url.path_segments_mut()
            .map_err(|()| PricingError::InvalidUrl(self.config.listings_url.clone()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }

    /// Wait until `request_delay` has passed since the previous request
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.config.request_delay {
                let wait = self.config.request_delay - elapsed;
                tracing::debug!("Rate limiting: waiting {}ms", wait.as_millis());
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn scrape_listing(&self, url: Url) -> Result<Option<f64>, PricingError> {
        let html = self
            .client
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_listing_html(&html))
    }

    /// Try each candidate name in turn. With a budget, only the time spent on
    /// outbound requests is charged to it; waiting on the throttle is free.
    async fn fetch_price(&self, label: &str, budget: Option<Duration>) -> Result<f64, PricingError> {
        let mut last_error = PricingError::NoPrice(label.to_string());
        let mut remaining = budget;

        for name in candidate_names(label) {
            if remaining.is_some_and(|left| left.is_zero()) {
                break;
            }
            let url = self.listing_url(&name)?;

            self.throttle().await;
            tracing::debug!("Fetching listing page: {url}");
            let started = Instant::now();
            let outcome = match remaining {
                Some(left) => tokio::time::timeout(left, self.scrape_listing(url))
                    .await
                    .unwrap_or_else(|_| Err(PricingError::Timeout(name.clone()))),
                None => self.scrape_listing(url).await,
            };
            remaining = remaining.map(|left| left.saturating_sub(started.elapsed()));

            match outcome {
                Ok(Some(price)) => return Ok(price),
                Ok(None) => tracing::debug!("No price element on listing page for '{name}'"),
                Err(e) => {
                    tracing::debug!("Listing lookup failed for '{name}': {e}");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    fn in_flight(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Lookup>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch a label once no matter how many callers ask for it at the same
    /// time. Later callers wait for the first fetch and reuse its outcome.
    async fn shared_fetch(&self, label: &str, budget: Option<Duration>) -> Option<f64> {
        let lookup = Arc::clone(self.in_flight().entry(label.to_string()).or_default());

        let price = *lookup
            .get_or_init(|| async move {
                if let Some(price) = self.cache.get(label) {
                    return Some(price);
                }
                match self.fetch_price(label, budget).await {
                    Ok(price) => {
                        tracing::debug!("Market price for {label}: ${price}");
                        self.cache.insert(label, price);
                        Some(price)
                    }
                    Err(e) => {
                        tracing::warn!("Failed to fetch price for {label}, using fallback: {e}");
                        None
                    }
                }
            })
            .await;

        {
            let mut in_flight = self.in_flight();
            if in_flight
                .get(label)
                .is_some_and(|current| Arc::ptr_eq(current, &lookup))
            {
                in_flight.remove(label);
            }
        }
        price
    }

    async fn quote(&self, label: &str, budget: Option<Duration>) -> PriceQuote {
        let source_url = search_url_for(&self.config.search_url, label);

        if let Some(price) = self.cache.get(label) {
            tracing::debug!("Using cached price for {label}: ${price}");
            return PriceQuote::new(label, price, source_url);
        }

        match self.shared_fetch(label, budget).await {
            Some(price) => PriceQuote::new(label, price, source_url),
            None => PriceQuote::fallback(label, source_url),
        }
    }
}

#[async_trait]
impl PriceResolver for MarketPriceResolver {
    async fn resolve(&self, label: &str) -> PriceQuote {
        self.quote(label, None).await
    }

    async fn resolve_within(&self, label: &str, budget: Duration) -> PriceQuote {
        self.quote(label, Some(budget)).await
    }

    fn clear_cache(&self) {
        self.cache.clear();
    }

    fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_names() {
        assert_eq!(
            candidate_names("Sticker | NaVi | Paris 2023"),
            vec!["Sticker | NaVi | Paris 2023", "NaVi Paris 2023"]
        );
        assert_eq!(candidate_names("Howling Dawn"), vec!["Howling Dawn"]);
    }

    #[test]
    fn test_search_url_encodes_label() {
        let url = market_search_url("Sticker | NaVi | Paris 2023");
        assert!(url.starts_with(DEFAULT_SEARCH_URL));
        assert!(url.contains("appid=730"));
        assert!(!url.contains(' '));
        assert!(!url.contains('|'));
    }

    #[test]
    fn test_listing_url_appends_segment() {
        let resolver = MarketPriceResolver::new().unwrap();
        let url = resolver.listing_url("Sticker | NaVi | Paris 2023").unwrap();
        let text = url.as_str();
        assert!(text.starts_with("https://steamcommunity.com/market/listings/730/Sticker"));
        assert!(!text.contains(' '));
    }

    #[test]
    fn test_parse_listing_html() {
        let html = r#"
            <html><body>
              <div class="market_listing_row">
                <span class="market_listing_price market_listing_price_with_fee">
                    $0.42
                </span>
              </div>
            </body></html>
        "#;
        assert_eq!(parse_listing_html(html), Some(0.42));
    }

    #[test]
    fn test_parse_listing_html_skips_unpriced() {
        let html = r#"
            <span class="market_listing_price_with_fee">Sold!</span>
            <span class="market_listing_price">$1.10</span>
        "#;
        assert_eq!(parse_listing_html(html), Some(1.1));
        assert_eq!(parse_listing_html("<p>There are no listings</p>"), None);
    }
}
