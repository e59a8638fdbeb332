use crate::ledger::Block;
use crate::node::HoneyNode;
use crate::pow::ProofOfWork;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Shared application state: the single ledger node behind every handler.
pub struct AppState {
    pub node: HoneyNode,
}

impl AppState {
    pub fn new(pow: ProofOfWork) -> Self {
        Self {
            node: HoneyNode::new(pow),
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/* ---------- Farmer API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterFarmerRequest {
    pub farmer_id: Option<String>,
}

#[derive(Serialize)]
pub struct FarmersResponse {
    pub farmers: Vec<String>,
}

#[derive(Serialize)]
pub struct FarmerStatusResponse {
    pub farmer_id: String,
    pub registered: bool,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub farmer_id: Option<String>,
    pub amount: Option<i64>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub farmer_id: String,
    pub amount: i64,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Chain API Models ---------- */

#[derive(Deserialize)]
pub struct MineQuery {
    pub miner_id: Option<String>,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub miner_id: String,
    pub block: Block,
}

#[derive(Serialize)]
pub struct ChainResponse {
    pub length: usize,
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub farmer_id: String,
    pub balance: i128,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub node_id: String,
    pub height: usize,
    pub difficulty: usize,
    pub pending_transactions: usize,
    pub farmers: usize,
    pub last_interval_ms: Option<i64>,
}
