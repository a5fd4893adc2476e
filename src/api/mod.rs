//! HTTP API server

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::MessageStore;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Service identifier reported by the health check
pub const SERVICE_NAME: &str = "backend-api";

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/health", get(handlers::health))
                .route(
                    "/messages",
                    get(handlers::list_messages).post(handlers::create_message),
                ),
        )
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience helper for the default (flat 500) error mapping
pub fn create_store_router(store: Arc<dyn MessageStore>) -> Router {
    create_router(AppState::new(store))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
}
