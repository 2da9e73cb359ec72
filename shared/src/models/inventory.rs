//! Inventory Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Description used when an item is defined without one
pub const DEFAULT_DESCRIPTION: &str = "No description.";
/// Category used when an item is defined without one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Full catalog keyed by normalized item key (sorted, so snapshots are stable on disk)
pub type Inventory = BTreeMap<String, InventoryItem>;

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Stock entry for a single menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Units on hand, never negative
    #[serde(default)]
    pub quantity: i32,
    /// Unit price, a JSON number on disk
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
}

impl InventoryItem {
    /// Create an item, falling back to the default description/category for blank input
    pub fn new(quantity: i32, price: Decimal, description: &str, category: &str) -> Self {
        Self {
            quantity,
            price,
            description: non_blank_or(description, DEFAULT_DESCRIPTION),
            category: non_blank_or(category, DEFAULT_CATEGORY),
        }
    }

    /// Clamp values that would break the stock invariants.
    ///
    /// Returns `true` if anything had to be changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if self.quantity < 0 {
            self.quantity = 0;
            changed = true;
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            self.price = Decimal::ZERO;
            changed = true;
        }
        changed
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalize a user-supplied item name into its catalog key
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Human-facing name for a key ("soda" -> "Soda")
pub fn display_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
