//! Price list operations.

use super::{LabStore, Record, StoreResult};
use crate::models::money::{ensure_non_negative, parse_money};
use crate::models::{require_text, PriceEntry, RecordId, ValidationError};
use crate::pricing::{self, PriceQuote};

impl Record for PriceEntry {
    const COLLECTION: &'static str = "prices";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("prosthesis", &self.prosthesis)?;
        ensure_non_negative("unit price", self.unit_price)
    }
}

impl LabStore {
    pub fn prices(&self) -> &[PriceEntry] {
        self.prices.records()
    }

    /// Add a price. A blank clinic scope means the general list.
    pub fn add_price(&mut self, prosthesis: &str, clinic: &str, unit_price: &str) -> StoreResult<PriceEntry> {
        let entry = PriceEntry::from_input(prosthesis, clinic, unit_price)?;
        self.prices.insert(entry.clone())?;
        log::info!(
            "Added price {} for '{}' ({})",
            entry.unit_price,
            entry.prosthesis,
            entry.clinic
        );
        Ok(entry)
    }

    /// Change the unit price of an entry. `false` when the id is unknown.
    pub fn update_unit_price(&mut self, id: &RecordId, unit_price: &str) -> StoreResult<bool> {
        let unit_price = parse_money("unit price", unit_price)?;
        let Some(entry) = self.prices.get(id) else {
            return Ok(false);
        };
        let mut entry = entry.clone();
        entry.unit_price = unit_price;
        self.prices.replace(entry)
    }

    pub fn delete_price(&mut self, id: &RecordId) -> StoreResult<bool> {
        self.prices.remove(id)
    }

    /// Quote a job against the current price list.
    pub fn quote(&self, prosthesis: &str, clinic: &str, count_text: &str) -> PriceQuote {
        pricing::quote(prosthesis, clinic, count_text, self.prices.records())
    }

    pub fn prosthesis_types(&self) -> Vec<String> {
        pricing::prosthesis_types(self.prices.records())
    }
}
