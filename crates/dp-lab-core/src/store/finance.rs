//! Bookkeeping entry operations.

use super::{LabStore, Record, StoreResult};
use crate::models::money::ensure_non_negative;
use crate::models::{FinanceEntry, FinanceInput, RecordId, ValidationError};

impl Record for FinanceEntry {
    const COLLECTION: &'static str = "finance";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ensure_non_negative("amount", self.amount)
    }
}

impl LabStore {
    pub fn finance(&self) -> &[FinanceEntry] {
        self.finance.records()
    }

    pub fn add_finance_entry(&mut self, input: FinanceInput) -> StoreResult<FinanceEntry> {
        let entry = input.into_entry(RecordId::generate())?;
        self.finance.insert(entry.clone())?;
        log::info!("Recorded {} of {} for '{}'", entry.kind, entry.amount, entry.clinic);
        Ok(entry)
    }

    pub fn update_finance_entry(
        &mut self,
        id: &RecordId,
        input: FinanceInput,
    ) -> StoreResult<Option<FinanceEntry>> {
        if self.finance.get(id).is_none() {
            return Ok(None);
        }
        let entry = input.into_entry(id.clone())?;
        let replaced = self.finance.replace(entry.clone())?;
        Ok(replaced.then_some(entry))
    }

    pub fn delete_finance_entry(&mut self, id: &RecordId) -> StoreResult<bool> {
        self.finance.remove(id)
    }
}
