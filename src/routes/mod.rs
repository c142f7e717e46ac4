use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{HistoryStore, MovieCatalog, RecommendationPipeline},
};

pub mod history;
pub mod movies;
pub mod recommendations;

/// Shared handler state: the two collaborators plus the pipeline built on them
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<dyn HistoryStore>,
    pub catalog: Arc<dyn MovieCatalog>,
    pub pipeline: RecommendationPipeline,
    /// Deadline for single external calls made directly by handlers
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        catalog: Arc<dyn MovieCatalog>,
        request_timeout: Duration,
    ) -> Self {
        let pipeline =
            RecommendationPipeline::new(history.clone(), catalog.clone(), request_timeout);
        Self {
            history,
            catalog,
            pipeline,
            request_timeout,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/movies/search", get(movies::search))
        .route("/movies/popular", get(movies::popular))
        .route(
            "/users/:user_id/history",
            get(history::list).post(history::add),
        )
        .route("/users/:user_id/history/:movie_id", get(history::watched))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
