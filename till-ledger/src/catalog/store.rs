use crate::utils::fs::write_atomic;
use serde_json::{Map, Value};
use shared::models::{Inventory, InventoryItem, normalize_key};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Persistent item catalog
pub trait CatalogStore {
    /// Load the full mapping. Missing or unreadable data yields an empty inventory.
    fn load(&self) -> Inventory;

    /// Overwrite the stored mapping with `inventory`
    fn save(&self, inventory: &Inventory) -> CatalogResult<()>;
}

/// Catalog stored as a pretty-printed JSON object (`menu.json`)
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load(&self) -> Inventory {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Catalog file not found, starting empty");
                return Inventory::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Catalog file unreadable, starting empty");
                return Inventory::new();
            }
        };

        match serde_json::from_str::<Map<String, Value>>(&content) {
            Ok(raw) => decode_inventory(raw),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Catalog file is corrupt, starting empty");
                Inventory::new()
            }
        }
    }

    fn save(&self, inventory: &Inventory) -> CatalogResult<()> {
        let content = serde_json::to_vec_pretty(inventory)?;
        write_atomic(&self.path, &content)?;
        tracing::debug!(path = %self.path.display(), items = inventory.len(), "Catalog saved");
        Ok(())
    }
}

/// Validate raw catalog records at the load boundary.
///
/// Each record is decoded on its own: missing fields take defaults, negative
/// quantity/price clamp to zero, records that cannot be decoded at all are
/// skipped. Keys are normalized; on a collision the first record wins.
pub fn decode_inventory(raw: Map<String, Value>) -> Inventory {
    let mut inventory = Inventory::new();

    for (raw_key, value) in raw {
        let key = normalize_key(&raw_key);
        if key.is_empty() {
            tracing::warn!(key = %raw_key, "Skipping catalog record with empty key");
            continue;
        }
        if inventory.contains_key(&key) {
            tracing::warn!(key = %key, "Skipping duplicate catalog record");
            continue;
        }

        let mut item = match serde_json::from_value::<InventoryItem>(value) {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Skipping malformed catalog record");
                continue;
            }
        };
        if item.sanitize() {
            tracing::warn!(key = %key, "Clamped negative quantity/price in catalog record");
        }
        inventory.insert(key, item);
    }

    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::DEFAULT_CATEGORY;
    use std::str::FromStr;

    fn store_in(dir: &tempfile::TempDir) -> JsonCatalogStore {
        JsonCatalogStore::new(dir.path().join("menu.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_empty());

        std::fs::write(store.path(), "[1, 2, 3]").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut inventory = Inventory::new();
        inventory.insert(
            "soda".to_string(),
            InventoryItem::new(10, Decimal::from_str("2.00").unwrap(), "Cold can", "Drinks"),
        );
        store.save(&inventory).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        let soda = &loaded["soda"];
        assert_eq!(soda.quantity, 10);
        assert_eq!(soda.price, Decimal::from(2));
        assert_eq!(soda.category, "Drinks");
    }

    #[test]
    fn test_saved_prices_are_json_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"soda": {"quantity": 10, "price": 19.99}}"#).unwrap();

        store.save(&store.load()).unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert!(raw["soda"]["price"].is_number());
        assert_eq!(raw["soda"]["price"].as_f64(), Some(19.99));
        assert_eq!(store.load()["soda"].price, Decimal::from_str("19.99").unwrap());
    }

    #[test]
    fn test_decode_skips_and_clamps() {
        let raw: Map<String, Value> = serde_json::from_str(
            r#"{
                "Soda ": {"quantity": 10, "price": 2.0},
                "soda": {"quantity": 99, "price": 9.0},
                "fries": {"quantity": -4, "price": -1.5, "description": "Salty"},
                "pizza": "not a record",
                "   ": {"quantity": 1, "price": 1.0},
                "cake": {"price": 4.25}
            }"#,
        )
        .unwrap();

        let inventory = decode_inventory(raw);
        assert_eq!(inventory.len(), 3);
        assert!(!inventory.contains_key("pizza"));

        // map iteration is key-ordered, so "Soda " is seen before "soda"
        assert_eq!(inventory["soda"].quantity, 10);

        assert_eq!(inventory["fries"].quantity, 0);
        assert_eq!(inventory["fries"].price, Decimal::ZERO);
        assert_eq!(inventory["fries"].description, "Salty");

        assert_eq!(inventory["cake"].quantity, 0);
        assert_eq!(inventory["cake"].category, DEFAULT_CATEGORY);
    }
}
