//! Verification step in front of the pending pool.
//!
//! Kept apart from `Ledger` so extra checks can be added here without
//! touching how the ledger commits a transaction.

use log::warn;

use crate::error::LedgerError;
use crate::ledger::Ledger;

/// Verify a transaction and, if it passes, queue it on the ledger.
/// Returns the index of the block that will hold it.
pub fn admit(ledger: &mut Ledger, farmer_id: &str, amount: i64) -> Result<u64, LedgerError> {
    if !ledger.is_registered(farmer_id) {
        warn!("rejected tx from unregistered farmer {farmer_id} (amount={amount})");
        return Err(LedgerError::UnregisteredFarmer(farmer_id.to_string()));
    }
    ledger.admit_transaction(farmer_id, amount)
}
