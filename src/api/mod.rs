mod balance;
mod chain;
mod farmers;
mod health;
pub mod models;
mod stats;
mod tx;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::web::{self, ServiceConfig};
use actix_web::{HttpRequest, HttpResponse};

pub use models::AppState;
use models::MessageResponse;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .service(health::health_check)
            .service(farmers::register_farmer)
            .service(farmers::get_farmers)
            .service(farmers::get_farmer)
            .service(tx::post_transaction)
            .service(tx::get_pending)
            .service(chain::mine_block)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(balance::get_balance)
            .service(stats::get_stats),
    );
}

/// Malformed bodies get the same JSON error shape as every other rejection.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(MessageResponse::new(format!("Invalid JSON body: {err}")));
    InternalError::from_response(err, response).into()
}
