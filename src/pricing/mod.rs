//! Price resolution for sticker labels.
//!
//! Everything the enrichment stage knows about pricing goes through the
//! [`PriceResolver`] trait: give it a label, get back a [`PriceQuote`]. Resolvers
//! never fail from the caller's point of view; when a price cannot be found the
//! quote carries the fallback amount and `fallback: true`.
//!
//! Available resolvers:
//!
//! - [`MarketPriceResolver`]: reads the lowest listing price from the public
//!   market pages, with request spacing and a bounded [`PriceCache`]
//! - [`TablePriceResolver`]: fixed prices from a JSON table, for offline use
//! - [`FallbackResolver`]: every label gets the fallback quote
//!
//! [`PriceResolver`]: resolver::PriceResolver
//! [`PriceQuote`]: crate::core::combination::PriceQuote
//! [`MarketPriceResolver`]: market::MarketPriceResolver
//! [`TablePriceResolver`]: table::TablePriceResolver
//! [`FallbackResolver`]: resolver::FallbackResolver
//! [`PriceCache`]: cache::PriceCache

pub mod cache;
pub mod extract;
pub mod market;
pub mod resolver;
pub mod table;
