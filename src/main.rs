mod admission;
mod api;
mod config;
mod error;
mod ledger;
mod node;
mod pow;
mod sealer;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use config::Config;
use pow::ProofOfWork;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = Config::from_env();
    let state = web::Data::new(AppState::new(ProofOfWork::new(cfg.difficulty)));

    info!(
        "🍯 Starting honey ledger node {} at http://{}:{} (difficulty {})",
        state.node.node_id(),
        cfg.host,
        cfg.port,
        cfg.difficulty
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}
