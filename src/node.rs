use std::sync::RwLock;
use uuid::Uuid;

use crate::admission;
use crate::error::LedgerError;
use crate::ledger::{Block, Ledger};
use crate::pow::ProofOfWork;
use crate::sealer::BlockSealer;
use crate::transaction::Transaction;

/// The process-wide ledger plus the puzzle it is sealed with.
///
/// Mutations take the write lock; queries share the read lock.
#[derive(Debug)]
pub struct HoneyNode {
    node_id: String,
    ledger: RwLock<Ledger>,
    pow: ProofOfWork,
}

impl HoneyNode {
    pub fn new(pow: ProofOfWork) -> Self {
        Self {
            node_id: Uuid::new_v4().simple().to_string(),
            ledger: RwLock::new(Ledger::new()),
            pow,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn difficulty(&self) -> usize {
        self.pow.difficulty()
    }

    pub fn register_farmer(&self, farmer_id: &str) -> bool {
        self.ledger
            .write()
            .expect("ledger lock poisoned")
            .register_farmer(farmer_id)
    }

    pub fn is_registered(&self, farmer_id: &str) -> bool {
        self.read().is_registered(farmer_id)
    }

    pub fn farmers(&self) -> Vec<String> {
        self.read().farmers()
    }

    pub fn admit_transaction(&self, farmer_id: &str, amount: i64) -> Result<u64, LedgerError> {
        let mut ledger = self.ledger.write().expect("ledger lock poisoned");
        admission::admit(&mut ledger, farmer_id, amount)
    }

    /// Seal the pending pool into a new block. CPU-bound.
    pub fn mine(&self) -> Result<Block, LedgerError> {
        BlockSealer::new(&self.ledger, &self.pow).mine()
    }

    pub fn balance_of(&self, farmer_id: &str) -> i128 {
        self.read().balance_of(farmer_id)
    }

    /// Snapshot of the whole chain.
    pub fn export_chain(&self) -> Vec<Block> {
        self.read().chain().to_vec()
    }

    pub fn pending(&self) -> Vec<Transaction> {
        self.read().pending().to_vec()
    }

    pub fn height(&self) -> usize {
        self.read().len()
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        self.read().validate(&self.pow)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Ledger> {
        self.ledger.read().expect("ledger lock poisoned")
    }
}

impl Default for HoneyNode {
    fn default() -> Self {
        Self::new(ProofOfWork::default())
    }
}
