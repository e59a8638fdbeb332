use serde::{Deserialize, Serialize};

/// A honey contribution submitted by a registered farmer.
///
/// The amount is not range-checked: zero and negative quantities are
/// admitted as-is and simply flow into the farmer's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub farmer_id: String,
    pub amount: i64,
}

impl Transaction {
    pub fn new(farmer_id: impl Into<String>, amount: i64) -> Self {
        Self {
            farmer_id: farmer_id.into(),
            amount,
        }
    }
}
