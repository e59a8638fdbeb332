use log::{debug, info};
use std::collections::{HashMap, HashSet};

use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::error::LedgerError;
use crate::pow::ProofOfWork;
use crate::transaction::Transaction;

/// In-memory chain of blocks, the pending pool and the farmer registry.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    farmers: HashSet<String>,
    // Running totals over sealed blocks, kept in step by `seal_block`.
    balances: HashMap<String, i128>,
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            farmers: HashSet::new(),
            balances: HashMap::new(),
        }
    }

    /// Returns false if the farmer was already known.
    pub fn register_farmer(&mut self, farmer_id: &str) -> bool {
        if !self.farmers.insert(farmer_id.to_string()) {
            return false;
        }
        info!("registered farmer {farmer_id} ({} total)", self.farmers.len());
        true
    }

    pub fn is_registered(&self, farmer_id: &str) -> bool {
        self.farmers.contains(farmer_id)
    }

    /// Registered farmer ids, sorted.
    pub fn farmers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.farmers.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Queue a transaction for the next block and return that block's index.
    pub fn admit_transaction(&mut self, farmer_id: &str, amount: i64) -> Result<u64, LedgerError> {
        if !self.is_registered(farmer_id) {
            return Err(LedgerError::UnregisteredFarmer(farmer_id.to_string()));
        }
        self.pending.push(Transaction::new(farmer_id, amount));
        debug!(
            "admitted tx farmer={farmer_id} amount={amount} (pending: {})",
            self.pending.len()
        );
        Ok(self.len() as u64 + 1)
    }

    /// Append a block holding the whole pending pool and empty the pool.
    ///
    /// `previous_hash` must equal the hash of the current last block; a
    /// mismatch means the tip moved and nothing is changed.
    pub fn seal_block(&mut self, proof: u64, previous_hash: String) -> Result<&Block, LedgerError> {
        let expected = Self::hash(self.last_block());
        if previous_hash != expected {
            return Err(LedgerError::StaleParentHash {
                expected,
                found: previous_hash,
            });
        }

        let transactions = std::mem::take(&mut self.pending);
        for tx in &transactions {
            *self.balances.entry(tx.farmer_id.clone()).or_insert(0) += i128::from(tx.amount);
        }

        let block = Block::new(self.len() as u64 + 1, transactions, proof, previous_hash);
        info!(
            "sealed block #{} with {} txs (proof={})",
            block.index,
            block.transactions.len(),
            block.proof
        );
        self.chain.push(block);
        Ok(self.last_block())
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds the genesis block")
    }

    pub fn hash(block: &Block) -> String {
        block.hash()
    }

    /// Sum of sealed amounts for `farmer_id`; pending transactions don't count.
    pub fn balance_of(&self, farmer_id: &str) -> i128 {
        self.balances.get(farmer_id).copied().unwrap_or(0)
    }

    /// Same as `balance_of`, computed by replaying every sealed block.
    pub fn replay_balance_of(&self, farmer_id: &str) -> i128 {
        self.chain
            .iter()
            .flat_map(|b| &b.transactions)
            .filter(|tx| tx.farmer_id == farmer_id)
            .map(|tx| i128::from(tx.amount))
            .sum()
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Validate the entire chain: genesis, index sequence, linkage and proofs,
    /// then check the balance cache against a full replay.
    pub fn validate(&self, pow: &ProofOfWork) -> Result<(), LedgerError> {
        let genesis = self
            .chain
            .first()
            .ok_or_else(|| LedgerError::InvalidChain("chain is empty".into()))?;
        if genesis.index != 1
            || genesis.proof != GENESIS_PROOF
            || genesis.previous_hash != GENESIS_PREVIOUS_HASH
            || !genesis.transactions.is_empty()
        {
            return Err(LedgerError::InvalidChain("genesis block altered".into()));
        }

        for pair in self.chain.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);
            if current.index != prev.index + 1 {
                return Err(LedgerError::InvalidChain(format!(
                    "block #{} follows #{}",
                    current.index, prev.index
                )));
            }
            if current.previous_hash != Self::hash(prev) {
                return Err(LedgerError::InvalidChain(format!(
                    "block #{} does not link to #{}",
                    current.index, prev.index
                )));
            }
            if !pow.valid(prev.proof, current.proof) {
                return Err(LedgerError::InvalidChain(format!(
                    "block #{} has an invalid proof",
                    current.index
                )));
            }
        }

        for (farmer_id, cached) in &self.balances {
            let replayed = self.replay_balance_of(farmer_id);
            if *cached != replayed {
                return Err(LedgerError::InvalidChain(format!(
                    "balance of {farmer_id} is {cached}, chain says {replayed}"
                )));
            }
        }

        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::error::LedgerError;
    use crate::pow::ProofOfWork;
    use crate::transaction::Transaction;

    fn seal_next(ledger: &mut Ledger, pow: &ProofOfWork) {
        let last = ledger.last_block();
        let proof = pow.solve(last.proof);
        let prev_hash = Ledger::hash(last);
        ledger.seal_block(proof, prev_hash).unwrap();
    }

    #[test]
    fn fresh_ledger_has_only_genesis() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        let genesis = &ledger.chain()[0];
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, 100);
        assert_eq!(genesis.previous_hash, "1");
        assert!(genesis.transactions.is_empty());
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn register_twice_is_a_noop() {
        let mut ledger = Ledger::new();
        assert!(ledger.register_farmer("f1"));
        assert!(!ledger.register_farmer("f1"));
        assert_eq!(ledger.farmers(), vec!["f1".to_string()]);
        assert!(ledger.is_registered("f1"));
        assert!(!ledger.is_registered("f2"));
    }

    #[test]
    fn unregistered_admission_leaves_pool_untouched() {
        let mut ledger = Ledger::new();
        let err = ledger.admit_transaction("unknown", 7).unwrap_err();
        assert_eq!(err, LedgerError::UnregisteredFarmer("unknown".into()));
        assert!(ledger.pending().is_empty());
        assert_eq!(ledger.balance_of("unknown"), 0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn admission_reports_next_block_index() {
        let mut ledger = Ledger::new();
        ledger.register_farmer("f1");
        assert_eq!(ledger.admit_transaction("f1", 10), Ok(2));
        assert_eq!(ledger.admit_transaction("f1", -3), Ok(2));
        assert_eq!(ledger.admit_transaction("f1", 0), Ok(2));
        assert_eq!(ledger.pending().len(), 3);
    }

    #[test]
    fn sealing_moves_pool_into_block() {
        let pow = ProofOfWork::new(2);
        let mut ledger = Ledger::new();
        ledger.register_farmer("f1");
        ledger.admit_transaction("f1", 10).unwrap();
        ledger.admit_transaction("f1", 5).unwrap();

        assert_eq!(ledger.balance_of("f1"), 0, "pending txs are not counted");
        seal_next(&mut ledger, &pow);

        let block = ledger.last_block();
        assert_eq!(block.index, 2);
        assert_eq!(
            block.transactions,
            vec![Transaction::new("f1", 10), Transaction::new("f1", 5)]
        );
        assert!(ledger.pending().is_empty());
        assert_eq!(ledger.balance_of("f1"), 15);

        ledger.admit_transaction("f1", 1).unwrap();
        assert_eq!(ledger.last_block().transactions.len(), 2);
    }

    #[test]
    fn stale_parent_hash_is_rejected() {
        let mut ledger = Ledger::new();
        ledger.register_farmer("f1");
        ledger.admit_transaction("f1", 4).unwrap();

        let err = ledger.seal_block(1, "not-the-tip".into()).unwrap_err();
        assert!(matches!(err, LedgerError::StaleParentHash { .. }));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.pending().len(), 1);
    }

    #[test]
    fn cached_balance_matches_replay() {
        let pow = ProofOfWork::new(1);
        let mut ledger = Ledger::new();
        for id in ["a", "b", "c"] {
            ledger.register_farmer(id);
        }
        for round in 0..5i64 {
            ledger.admit_transaction("a", round).unwrap();
            ledger.admit_transaction("b", -round).unwrap();
            if round % 2 == 0 {
                ledger.admit_transaction("a", 100).unwrap();
            }
            seal_next(&mut ledger, &pow);
            for id in ["a", "b", "c", "nobody"] {
                assert_eq!(ledger.balance_of(id), ledger.replay_balance_of(id));
            }
        }
        ledger.admit_transaction("c", 9).unwrap();
        assert_eq!(ledger.balance_of("a"), 310);
        assert_eq!(ledger.balance_of("b"), -10);
        assert_eq!(ledger.balance_of("c"), 0);
    }

    #[test]
    fn validate_accepts_honest_chain() {
        let pow = ProofOfWork::new(2);
        let mut ledger = Ledger::new();
        ledger.register_farmer("f1");
        for amount in 1..=3 {
            ledger.admit_transaction("f1", amount).unwrap();
            seal_next(&mut ledger, &pow);
        }
        assert_eq!(ledger.validate(&pow), Ok(()));
        for pair in ledger.chain().windows(2) {
            assert_eq!(Ledger::hash(&pair[0]), pair[1].previous_hash);
        }
    }

    #[test]
    fn validate_detects_tampering() {
        let pow = ProofOfWork::new(2);
        let mut ledger = Ledger::new();
        ledger.register_farmer("f1");
        ledger.admit_transaction("f1", 10).unwrap();
        seal_next(&mut ledger, &pow);
        seal_next(&mut ledger, &pow);

        ledger.chain[1].transactions[0].amount = 1_000;
        assert!(matches!(
            ledger.validate(&pow),
            Err(LedgerError::InvalidChain(_))
        ));
    }

    #[test]
    fn validate_detects_balance_cache_drift() {
        let pow = ProofOfWork::new(1);
        let mut ledger = Ledger::new();
        ledger.register_farmer("f1");
        ledger.admit_transaction("f1", 3).unwrap();
        seal_next(&mut ledger, &pow);
        assert_eq!(ledger.validate(&pow), Ok(()));

        ledger.balances.insert("f1".into(), 4);
        assert!(ledger.validate(&pow).is_err());
    }

    #[test]
    fn validate_detects_bad_proof() {
        let pow = ProofOfWork::new(2);
        let mut ledger = Ledger::new();
        let last = ledger.last_block();
        let bad = (0..).find(|p| !pow.valid(last.proof, *p)).unwrap();
        let prev_hash = Ledger::hash(last);
        ledger.seal_block(bad, prev_hash).unwrap();

        assert!(ledger.validate(&pow).is_err());
        assert_eq!(ledger.validate(&ProofOfWork::new(0)), Ok(()));
    }
}
