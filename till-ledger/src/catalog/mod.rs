//! Item catalog persistence
//!
//! The catalog is the full [`Inventory`](shared::models::Inventory) mapping,
//! stored as one JSON object and rewritten in full on every mutation.

mod store;

pub use store::{CatalogError, CatalogResult, CatalogStore, JsonCatalogStore, decode_inventory};
