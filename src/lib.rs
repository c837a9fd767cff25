//! # sticker-solver
//!
//! Spell a name out of sticker names and rank the results by price.
//!
//! Given a target such as `"navi"`, the engine finds every sequence of up to
//! five stickers from the catalog whose names, read left to right, spell the
//! target. Each sticker contributes the leading part of its own name that
//! covers its slice of the target. The combinations are then priced sticker by
//! sticker through a [`PriceResolver`] and ordered by total price.
//!
//! ## Features
//!
//! - **Backtracking search**: bounded combination size, candidate fan-out, and
//!   result budget
//! - **Concurrent pricing**: one bounded pool of lookups shared by all
//!   combinations, each under a timeout
//! - **Never-failing resolvers**: any lookup failure becomes a fallback quote
//! - **Stable ranking**: equal totals keep their search order
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sticker_solver::{NameGenerator, SortOrder, StickerCatalog};
//! use sticker_solver::pricing::resolver::FallbackResolver;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let catalog = Arc::new(StickerCatalog::load_embedded()?);
//! let generator = NameGenerator::new(catalog, Arc::new(FallbackResolver));
//!
//! for combo in generator.generate("navi", SortOrder::Asc).await {
//!     println!("{:.2} {}", combo.total_price.unwrap_or(0.0), combo.segments.join("|"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Sticker catalog storage and prefix index
//! - [`core`]: Stickers, combinations, and price quotes
//! - [`matching`]: Search engine, enrichment, and ranking
//! - [`parsing`]: Market label parsing
//! - [`pricing`]: Price resolvers and their cache
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod pricing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::StickerCatalog;
pub use core::combination::{Combination, PriceQuote};
pub use core::sticker::Sticker;
pub use core::types::*;
pub use matching::engine::{SearchConfig, SegmentationEngine};
pub use matching::generator::NameGenerator;
pub use pricing::resolver::PriceResolver;
