use indexmap::IndexMap;

/// A line taken out of the pending order, kept for one-step undo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedLine {
    pub item: String,
    pub quantity: i32,
}

/// The customer's in-progress cart
///
/// Entries keep insertion order and always hold a quantity > 0; callers
/// delete an entry instead of storing zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingOrder {
    lines: IndexMap<String, i32>,
    last_removed: Option<RemovedLine>,
}

impl PendingOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item: &str) -> Option<i32> {
        self.lines.get(item).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.lines.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last_removed(&self) -> Option<&RemovedLine> {
        self.last_removed.as_ref()
    }

    /// Set the quantity for `item`. Existing entries keep their position.
    pub(crate) fn set(&mut self, item: &str, quantity: i32) {
        debug_assert!(quantity > 0, "pending quantities are always positive");
        match self.lines.get_mut(item) {
            Some(qty) => *qty = quantity,
            None => {
                self.lines.insert(item.to_string(), quantity);
            }
        }
    }

    /// Remove `item`, overwriting the undo slot. Returns the removed quantity.
    pub(crate) fn remove(&mut self, item: &str) -> Option<i32> {
        let quantity = self.lines.shift_remove(item)?;
        self.last_removed = Some(RemovedLine {
            item: item.to_string(),
            quantity,
        });
        Some(quantity)
    }

    pub(crate) fn take_last_removed(&mut self) -> Option<RemovedLine> {
        self.last_removed.take()
    }

    /// Drop every line and the undo slot
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
        self.last_removed = None;
    }
}
