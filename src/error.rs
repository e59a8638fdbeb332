use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("farmer not registered: {0}")]
    UnregisteredFarmer(String),

    #[error("farmer already registered: {0}")]
    DuplicateFarmer(String),

    /// The chain tip moved between taking the parent hash and sealing.
    #[error("stale parent hash: expected {expected}, found {found}")]
    StaleParentHash { expected: String, found: String },

    #[error("invalid chain: {0}")]
    InvalidChain(String),
}
