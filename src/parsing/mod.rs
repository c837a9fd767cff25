//! Parsers for sticker catalog data.
//!
//! Market labels follow a fixed shape:
//!
//! ```text
//! Sticker | <name> [(<finish>)] | <tournament>
//! ```
//!
//! | Part | Example | Used for |
//! |------|---------|----------|
//! | name | `Senzu` | match key (lower-cased) |
//! | finish | `Gold` | rarity payload |
//! | tournament | `Shanghai 2024` | payload |
//!
//! ## Example
//!
//! ```rust
//! use sticker_solver::parsing::label::parse_label;
//!
//! let sticker = parse_label("Sticker | NaVi (Holo) | Paris 2023");
//! assert_eq!(sticker.match_key, "navi");
//! ```

pub mod label;
