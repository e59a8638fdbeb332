use log::{debug, warn};
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::ledger::{Block, Ledger};
use crate::pow::ProofOfWork;

/// How many times a mining cycle restarts after the tip moved under it.
pub const MAX_SEAL_ATTEMPTS: usize = 8;

/// Runs one mining cycle: read the tip, solve the puzzle, seal.
pub struct BlockSealer<'a> {
    ledger: &'a RwLock<Ledger>,
    pow: &'a ProofOfWork,
}

impl<'a> BlockSealer<'a> {
    pub fn new(ledger: &'a RwLock<Ledger>, pow: &'a ProofOfWork) -> Self {
        Self { ledger, pow }
    }

    /// Mine and append a new block holding the current pending pool.
    ///
    /// The search runs with no lock held. The write lock is only taken for
    /// the append, which re-checks the parent hash; if another block was
    /// sealed meanwhile the proof is discarded and the cycle restarts.
    pub fn mine(&self) -> Result<Block, LedgerError> {
        let mut attempt = 1;
        loop {
            let (last_proof, previous_hash, tip) = {
                let ledger = self.ledger.read().expect("ledger lock poisoned");
                let last = ledger.last_block();
                (last.proof, Ledger::hash(last), last.index)
            };

            debug!(
                "searching proof on top of block #{tip} (difficulty {})",
                self.pow.difficulty()
            );
            let proof = self.pow.solve(last_proof);

            let mut ledger = self.ledger.write().expect("ledger lock poisoned");
            match ledger.seal_block(proof, previous_hash) {
                Ok(block) => return Ok(block.clone()),
                Err(err @ LedgerError::StaleParentHash { .. }) => {
                    if attempt >= MAX_SEAL_ATTEMPTS {
                        warn!("giving up sealing after {attempt} attempts: {err}");
                        return Err(err);
                    }
                    warn!("tip moved past block #{tip} while mining, retrying ({attempt})");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
