use actix_web::{HttpResponse, Responder, get, post, web};
use log::warn;

use super::models::{
    AppState, FarmerStatusResponse, FarmersResponse, MessageResponse, RegisterFarmerRequest,
};
use crate::error::LedgerError;

/// Register a farmer so their transactions are admitted.
#[post("/farmers/register/")]
pub async fn register_farmer(
    state: web::Data<AppState>,
    body: web::Json<RegisterFarmerRequest>,
) -> impl Responder {
    let farmer_id = match body.farmer_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return HttpResponse::BadRequest().json(MessageResponse::new("Farmer ID not provided")),
    };

    if !state.node.register_farmer(farmer_id) {
        warn!("{}", LedgerError::DuplicateFarmer(farmer_id.to_string()));
        return HttpResponse::BadRequest().json(MessageResponse::new("Farmer already registered"));
    }

    HttpResponse::Created().json(MessageResponse::new("Farmer registered successfully"))
}

#[get("/farmers/")]
pub async fn get_farmers(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(FarmersResponse {
        farmers: state.node.farmers(),
    })
}

#[get("/farmers/{farmer_id}/")]
pub async fn get_farmer(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let farmer_id = path.into_inner().0;
    let registered = state.node.is_registered(&farmer_id);
    HttpResponse::Ok().json(FarmerStatusResponse {
        farmer_id,
        registered,
    })
}
