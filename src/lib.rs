pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let development = state.config.development;

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/contact", post(handlers::contact::submit_contact))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handlers::contact::panic_response(
            development,
        )))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
