//! HTTP API layer with Axum routes and auth extractors.
//!
//! This crate provides:
//! - REST API routes
//! - Bearer-token principal extraction
//! - Error-to-response mapping

pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use resourcehub_core::vault::Vault;
use resourcehub_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for bearer-token validation.
    pub jwt: Arc<JwtService>,
    /// Attachment vault.
    pub vault: Arc<Vault>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
