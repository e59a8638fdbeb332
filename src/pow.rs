use sha2::{Digest, Sha256};

use crate::ledger::DEFAULT_DIFFICULTY;

/// A hex SHA-256 digest has 64 characters; no proof meets more zeros.
pub const MAX_DIFFICULTY: usize = 64;

/// Proof-of-Work puzzle: find `proof` such that
/// `sha256("{last_proof}{proof}")` starts with `difficulty` hex zeros.
#[derive(Debug, Clone)]
pub struct ProofOfWork {
    difficulty: usize,
    target_prefix: String,
}

impl ProofOfWork {
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty,
            target_prefix: "0".repeat(difficulty),
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Does `proof` solve the puzzle posed by `last_proof`?
    pub fn valid(&self, last_proof: u64, proof: u64) -> bool {
        let guess = format!("{last_proof}{proof}");
        let mut hasher = Sha256::new();
        hasher.update(guess.as_bytes());
        hex::encode(hasher.finalize()).starts_with(&self.target_prefix)
    }

    /// Linear search from 0; returns the smallest valid proof.
    ///
    /// Pure and unbounded. Touches no ledger state, so an abandoned search
    /// leaves nothing behind.
    pub fn solve(&self, last_proof: u64) -> u64 {
        let mut proof = 0u64;
        while !self.valid(last_proof, proof) {
            proof += 1;
        }
        proof
    }
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}
