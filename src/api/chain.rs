use actix_web::{HttpResponse, Responder, get, web};
use log::{error, info, warn};

use super::models::{
    AppState, ChainResponse, MessageResponse, MineQuery, MineResponse, ValidateResponse,
};

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let chain = state.node.export_chain();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let node = &state.node;
    let result = node.validate();
    HttpResponse::Ok().json(ValidateResponse {
        valid: result.is_ok(),
        length: node.height(),
        difficulty: node.difficulty(),
        error: result.err().map(|e| e.to_string()),
    })
}

/// Seal the pending pool into a new block.
///
/// The proof search is CPU-bound, so it runs on the blocking thread pool.
#[get("/mine/")]
pub async fn mine_block(state: web::Data<AppState>, query: web::Query<MineQuery>) -> impl Responder {
    let miner_id = match query.miner_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return HttpResponse::BadRequest().json(MessageResponse::new("Miner ID not provided")),
    };

    let worker_state = state.clone();
    match web::block(move || worker_state.node.mine()).await {
        Ok(Ok(block)) => {
            info!(
                "MINER {miner_id} - sealed block #{} ({} txs, proof={})",
                block.index,
                block.transactions.len(),
                block.proof
            );
            HttpResponse::Ok().json(MineResponse {
                message: "New block mined".into(),
                miner_id,
                block,
            })
        }
        Ok(Err(e)) => {
            warn!("MINER {miner_id} - sealing failed: {e}");
            HttpResponse::Conflict().json(MessageResponse::new(e.to_string()))
        }
        Err(e) => {
            error!("MINER {miner_id} - mining task failed: {e}");
            HttpResponse::InternalServerError().json(MessageResponse::new("Mining task failed"))
        }
    }
}
