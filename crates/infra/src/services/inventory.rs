use ppetrack_core::{DomainError, Entity, ItemCode, positive_quantity};
use ppetrack_inventory::{Direction, InventoryItem};

use crate::record_store::{RecordStore, RecordStoreExt};

use super::error::ServiceError;

/// Applies add/remove deltas to inventory records.
#[derive(Debug, Clone)]
pub struct InventoryService<S> {
    store: S,
}

impl<S: RecordStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adjust the stock of `item_code` by `delta` boxes.
    ///
    /// On success the whole inventory resource is rewritten with only the
    /// matching record changed, and the updated item is returned. On any
    /// failure nothing is written.
    pub fn adjust_quantity(
        &self,
        item_code: &ItemCode,
        delta: i64,
        direction: Direction,
    ) -> Result<InventoryItem, ServiceError> {
        positive_quantity(delta)?;

        // Mutations always abort on malformed rows: skipping would drop them on rewrite.
        let mut items: Vec<InventoryItem> = self.store.load_all()?;

        let idx = items
            .iter()
            .position(|i| i.id() == item_code)
            .ok_or_else(|| DomainError::item_not_found(item_code.as_str()))?;

        let new_quantity = match items[idx].adjusted_quantity(delta, direction) {
            Ok(q) => q,
            Err(err) => {
                tracing::warn!(item = %item_code, delta, %direction, error = %err, "stock adjustment rejected");
                return Err(err.into());
            }
        };

        let previous = items[idx].quantity;
        items[idx].quantity = new_quantity;
        self.store.overwrite_all(&items)?;

        tracing::info!(
            item = %item_code,
            %direction,
            delta,
            previous,
            current = new_quantity,
            "inventory updated"
        );
        Ok(items.swap_remove(idx))
    }

    /// All inventory items in file order.
    pub fn items(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        Ok(self.store.load_all()?)
    }
}
