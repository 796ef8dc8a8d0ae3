#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the Global API.
//!
//! Exposes locode resolution, city boundaries, Climate TRACE and EDGAR
//! emissions aggregation, and the catalogue timestamp under `/api/v0`.
//! Every storage-backed handler runs on the blocking thread pool with its
//! own short-lived session.

pub mod error;
mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use global_api_database::{Store, paths};

pub use error::ApiError;

/// Shared application state.
pub struct AppState {
    /// Global API database. Handlers take one session per request.
    pub store: Arc<Store>,
}

/// Registers every `/api/v0` route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v0")
            .route("/health", web::get().to(handlers::health))
            .route(
                "/cityboundary/locode/{lat}/{lon}",
                web::get().to(handlers::locodes),
            )
            .route(
                "/cityboundary/city/{locode}",
                web::get().to(handlers::city_boundary),
            )
            .route(
                "/climatetrace/city/{locode}/{year}/{reference_number}",
                web::get().to(handlers::climatetrace),
            )
            .route(
                "/edgar/city/{locode}/{year}/{reference_number}",
                web::get().to(handlers::edgar),
            )
            .route(
                "/catalogue/last-update",
                web::get().to(handlers::last_update),
            ),
    );
}

/// Starts the Global API server.
///
/// Opens the database named by `GLOBAL_API_DB_PATH` (default
/// `data/global_api.duckdb`) read-only and binds to `BIND_ADDR`:`PORT`
/// (default `127.0.0.1:8080`). This is a regular async function; the caller
/// provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the database cannot be opened or
/// the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let db_path = paths::db_path_from_env();
    log::info!("Opening database {}...", db_path.display());
    let store = Store::open_read_only(&db_path).map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState {
        store: Arc::new(store),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
