use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{AppState, MessageResponse, NewTxRequest, NewTxResponse, PendingResponse};

/// Submit a honey transaction into the pending pool.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: Result<web::Json<NewTxRequest>, actix_web::Error>,
) -> impl Responder {
    let Ok(body) = body else {
        warn!("POST /transactions/new/ - rejected: malformed body");
        return HttpResponse::BadRequest()
            .json(MessageResponse::new("Missing fields in transaction data"));
    };
    let NewTxRequest { farmer_id, amount } = body.into_inner();
    let (Some(farmer_id), Some(amount)) = (farmer_id, amount) else {
        return HttpResponse::BadRequest()
            .json(MessageResponse::new("Missing fields in transaction data"));
    };

    match state.node.admit_transaction(&farmer_id, amount) {
        Ok(index) => {
            debug!("POST /transactions/new/ - farmer={farmer_id} amount={amount} -> block {index}");
            HttpResponse::Created().json(NewTxResponse {
                message: format!("Transaction will be added to Block {index}"),
                farmer_id,
                amount,
            })
        }
        Err(e) => {
            warn!("POST /transactions/new/ - rejected: {e}");
            HttpResponse::BadRequest().json(MessageResponse::new(
                "Invalid transaction or farmer not registered",
            ))
        }
    }
}

/// List transactions waiting for the next block.
#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let transactions = state.node.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: transactions.len(),
        transactions,
    })
}
