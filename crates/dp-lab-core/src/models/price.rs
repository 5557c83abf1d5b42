//! Price list models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::parse_money;
use super::record::{require_text, RecordId, ValidationError};

/// Clinic scope of a price that applies to every clinic without an override.
pub const GENERAL_SCOPE: &str = "General";

/// Unit price of a prosthesis type, either for one clinic or in general.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceEntry {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    /// Prosthesis type
    pub prosthesis: String,
    /// Clinic name, or [`GENERAL_SCOPE`]
    pub clinic: String,
    pub unit_price: Decimal,
}

impl PriceEntry {
    /// Build a price entry from form text. A blank scope means general.
    pub fn from_input(prosthesis: &str, clinic: &str, unit_price: &str) -> Result<Self, ValidationError> {
        let prosthesis = require_text("prosthesis", prosthesis)?;
        let unit_price = parse_money("unit price", unit_price)?;
        let clinic = match clinic.trim() {
            "" => GENERAL_SCOPE.to_string(),
            scope => scope.to_string(),
        };
        Ok(Self {
            id: RecordId::generate(),
            prosthesis,
            clinic,
            unit_price,
        })
    }

    pub fn is_general(&self) -> bool {
        self.clinic == GENERAL_SCOPE
    }
}
