//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT (see `ServerConfig`).

use actix_files::Files;
use actix_web::{web::Data, App, HttpServer};
use cricket_dashboard_web::api::{configure, AppState};
use cricket_dashboard_web::{ComparisonClient, ServerConfig};
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let comparer = ComparisonClient::new(
        config.compare_host.clone(),
        config.compare_model.clone(),
        config.compare_timeout,
    )
    .map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!(
        "Player comparison uses model {} at {}",
        comparer.model(),
        config.compare_host
    );

    let state = Data::new(AppState::new(comparer));

    // Background task: every 30 minutes, remove rosters and matches idle past the timeout
    let state_cleanup = state.clone();
    let timeout = config.session_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let rosters = state_cleanup.rosters.remove_idle(timeout).unwrap_or(0);
            let matches = state_cleanup.matches.remove_idle(timeout).unwrap_or(0);
            if rosters + matches > 0 {
                log::info!(
                    "Cleaned up {} inactive roster(s) and {} inactive match(es)",
                    rosters,
                    matches
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
