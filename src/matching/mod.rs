//! Name spelling search, price enrichment and ranking.
//!
//! This module provides the core functionality:
//!
//! - [`SegmentationEngine`]: Finds every way to spell a target from catalog stickers
//! - [`Enricher`]: Resolves a price for every sticker and totals each combination
//! - [`NameGenerator`]: Search followed by enrichment, the caller-facing entry point
//!
//! ## Search Algorithm
//!
//! The engine walks the target left to right with a cursor. At each position it
//! tries every probe length; a probe selects the stickers whose match key
//! *starts with* it (up to a per-probe cap, in catalog order). Each selected
//! sticker is pushed onto the path, the search recurses past the probe, and the
//! sticker is popped again. A path that reaches the end of the target with at
//! most `max_combo_size` stickers is a combination.
//!
//! Because matching is by prefix, a sticker can stand for just the leading part
//! of its name. Each combination records the `segments` of the target its
//! stickers cover; the segments always concatenate to the target.
//!
//! ## Enrichment
//!
//! Every sticker in every combination gets its own resolver call. Calls run
//! concurrently behind a semaphore, each under a timeout that falls back to the
//! fallback quote. A combination's total is computed only after all of its
//! calls finish, and combinations are then stably sorted by total.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sticker_solver::{NameGenerator, SortOrder, StickerCatalog};
//! use sticker_solver::pricing::resolver::FallbackResolver;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let catalog = Arc::new(StickerCatalog::load_embedded()?);
//! let generator = NameGenerator::new(catalog, Arc::new(FallbackResolver));
//!
//! for combo in generator.generate("navi", SortOrder::Asc).await {
//!     println!("{:?} ${:.2}", combo.segments, combo.total_price.unwrap_or(0.0));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`SegmentationEngine`]: engine::SegmentationEngine
//! [`Enricher`]: enrich::Enricher
//! [`NameGenerator`]: generator::NameGenerator

pub mod engine;
pub mod enrich;
pub mod generator;
