//! Inventory operations.

use super::{LabStore, Record, StoreResult};
use crate::models::money::ensure_non_negative;
use crate::models::{require_text, InventoryInput, InventoryItem, RecordId, ValidationError};

impl Record for InventoryItem {
    const COLLECTION: &'static str = "inventory";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        ensure_non_negative("quantity", self.quantity)
    }
}

impl LabStore {
    pub fn inventory(&self) -> &[InventoryItem] {
        self.inventory.records()
    }

    pub fn add_inventory_item(&mut self, input: InventoryInput) -> StoreResult<InventoryItem> {
        let item = input.into_item(RecordId::generate())?;
        self.inventory.insert(item.clone())?;
        log::info!("Stocked {} {} of '{}'", item.quantity, item.unit, item.name);
        Ok(item)
    }

    pub fn update_inventory_item(
        &mut self,
        id: &RecordId,
        input: InventoryInput,
    ) -> StoreResult<Option<InventoryItem>> {
        if self.inventory.get(id).is_none() {
            return Ok(None);
        }
        let item = input.into_item(id.clone())?;
        let replaced = self.inventory.replace(item.clone())?;
        Ok(replaced.then_some(item))
    }

    pub fn delete_inventory_item(&mut self, id: &RecordId) -> StoreResult<bool> {
        self.inventory.remove(id)
    }
}
