//! HTTP surface: order search, admin order form and the Telegram webhook.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::slip::SlipChecker;
use crate::storage::SheetStore;

use super::{auth, handlers};

/// Shared state for every handler. Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SheetStore>,
    pub sheet_title: Arc<str>,
    pub admin_password: Arc<str>,
    pub slip_checker: Arc<SlipChecker>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route("/api/form-admin", post(handlers::form_admin_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/search/:account", get(handlers::search_handler))
        .route("/webhook", post(handlers::webhook_handler))
        .merge(admin)
        .layer(cors)
        .with_state(state)
}

/// Binds `0.0.0.0:port` and serves until the process stops.
pub async fn run_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = create_router(state);

    log::info!("Starting web server on http://{}", addr);
    log::info!("  GET  /api/search/:account - Orders grouped by release month");
    log::info!("  POST /api/form-admin      - Append admin order form");
    log::info!("  POST /webhook             - Telegram slip webhook");
    log::info!("  GET  /health              - Health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
