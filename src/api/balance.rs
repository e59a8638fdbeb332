use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, BalanceResponse};

#[get("/balance/{farmer_id}/")]
pub async fn get_balance(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let farmer_id = path.into_inner().0;
    let balance = state.node.balance_of(&farmer_id);
    HttpResponse::Ok().json(BalanceResponse { farmer_id, balance })
}
