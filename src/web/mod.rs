//! HTTP API for generating sticker combinations.
//!
//! The server wraps one shared [`NameGenerator`](crate::matching::generator::NameGenerator)
//! in axum handlers. The catalog is loaded once at startup; a failed load stops
//! the server before it binds.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! sticker-solver serve
//!
//! # Offline prices from a table, bound to all interfaces
//! sticker-solver serve --address 0.0.0.0 --prices table --price-table prices.json
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /api/stickers/generate` - Priced combinations for `{"name", "sort_order"}`
//! - `GET /api/stickers/search?name=&sort_order=` - Same, from the query string
//! - `GET /api/stickers/debug/{name}` - Unpriced combinations in search order
//! - `GET /api/catalog` - List all stickers in the catalog
//! - `GET /api/prices/cache` - Number of cached prices
//! - `DELETE /api/prices/cache` - Clear cached prices
//!
//! Request and response fields are snake_case; `sortOrder` is accepted as an
//! alias of `sort_order`. Rejected requests get `{error, error_type, details}`.

pub mod server;
