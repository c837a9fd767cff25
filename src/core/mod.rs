//! Core data types for spelling names out of stickers.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Sticker`]: A catalog entry with its full label and lower-cased match key
//! - [`Combination`]: An ordered list of stickers covering consecutive slices of a target
//! - [`PriceQuote`]: A resolved price for one sticker label
//! - [`SortOrder`], [`Rarity`]: Request and payload enums
//!
//! ## Match Keys
//!
//! A sticker's match key is the name portion of its label, lower-cased:
//!
//! | Label | Match key |
//! |-------|-----------|
//! | `Sticker \| Senzu (Gold) \| Shanghai 2024` | `senzu` |
//! | `Sticker \| NaVi \| Paris 2023` | `navi` |
//!
//! [`Sticker`]: sticker::Sticker
//! [`Combination`]: combination::Combination
//! [`PriceQuote`]: combination::PriceQuote
//! [`SortOrder`]: types::SortOrder
//! [`Rarity`]: types::Rarity

pub mod combination;
pub mod sticker;
pub mod types;
