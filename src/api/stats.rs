use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let node = &state.node;
    let chain = node.export_chain();

    let last_interval_ms = match chain.as_slice() {
        [.., older, newer] => Some((newer.timestamp - older.timestamp).max(0)),
        _ => None,
    };

    HttpResponse::Ok().json(StatsResponse {
        node_id: node.node_id().to_string(),
        height: chain.len(),
        difficulty: node.difficulty(),
        pending_transactions: node.pending().len(),
        farmers: node.farmers().len(),
        last_interval_ms,
    })
}
