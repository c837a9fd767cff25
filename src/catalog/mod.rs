//! Sticker catalog storage and indexing.
//!
//! The catalog is the fixed set of stickers names are spelled from. An embedded
//! catalog is compiled into the binary, but custom catalogs can also be loaded
//! from JSON files. Either a bare array of market labels or the exported format
//! (`{version, created_at, stickers}`) is accepted.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sticker_solver::StickerCatalog;
//!
//! // Load embedded catalog
//! let catalog = StickerCatalog::load_embedded().unwrap();
//!
//! // List stickers starting with "n"
//! for sticker in catalog.find_by_letter('n') {
//!     println!("{}", sticker.full_name);
//! }
//! ```
//!
//! ## Custom Catalogs
//!
//! ```rust,no_run
//! use sticker_solver::StickerCatalog;
//! use std::path::Path;
//!
//! let custom = StickerCatalog::load_from_file(Path::new("my_stickers.json")).unwrap();
//! let json = custom.to_json().unwrap();
//! ```

pub mod index;
pub mod store;
