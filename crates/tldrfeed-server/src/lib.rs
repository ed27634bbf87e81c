//! tldrfeed API Server
//!
//! REST layer over a [`FeedRepository`], plus the MongoDB backend.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tldrfeed::FeedRepository;

pub mod adapters;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod render;
pub mod routes;
pub mod server;

/// Prefix of every versioned API route
pub const API_VERSION: &str = "/api/v1";

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn FeedRepository>,
    pub indent_json: bool,
}

impl AppState {
    pub fn new(repo: Arc<dyn FeedRepository>, indent_json: bool) -> Self {
        Self { repo, indent_json }
    }
}

/// Build the full router with shared state
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::users::router())
        .merge(routes::feeds::router());

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(routes::health::health_check))
        .nest(API_VERSION, api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
