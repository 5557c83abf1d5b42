//! Lab inventory models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::dates::{normalize_optional_date, today_text};
use super::money::parse_decimal;
use super::record::{require_text, RecordId, ValidationError};

/// A stocked material or consumable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
    pub quantity: Decimal,
    /// Unit of measure (e.g., "g", "box")
    #[serde(default)]
    pub unit: String,
    /// Date received
    #[serde(default)]
    pub received: String,
    /// Expiry date, blank when not applicable
    #[serde(default)]
    pub expiry: String,
    /// Date to reorder by, blank when not planned
    #[serde(default)]
    pub reorder: String,
    #[serde(default)]
    pub note: String,
}

/// Inventory form input as text fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryInput {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub received: String,
    pub expiry: String,
    pub reorder: String,
    pub note: String,
}

impl InventoryInput {
    pub fn into_item(self, id: RecordId) -> Result<InventoryItem, ValidationError> {
        let name = require_text("name", &self.name)?;
        let quantity = parse_decimal("quantity", &self.quantity)?;
        let received = match normalize_optional_date("received date", &self.received)? {
            date if date.is_empty() => today_text(),
            date => date,
        };
        Ok(InventoryItem {
            id,
            name,
            quantity,
            unit: self.unit.trim().to_string(),
            received,
            expiry: normalize_optional_date("expiry date", &self.expiry)?,
            reorder: normalize_optional_date("reorder date", &self.reorder)?,
            note: self.note.trim().to_string(),
        })
    }
}
