use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::{
    error::AppResult, middleware::request_id::RequestId, routes::AppState,
    services::Recommendations,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: String,
    /// Friends to include; empty for personal recommendations
    #[serde(default)]
    pub friend_ids: Vec<String>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %request.user_id,
        friend_count = request.friend_ids.len(),
        "Processing recommendation request"
    );

    let recommendations = state
        .pipeline
        .recommend_for(&request.user_id, &request.friend_ids)
        .await?;

    tracing::info!(
        request_id = %request_id,
        recommended = recommendations.movies.len(),
        "Recommendation request completed"
    );

    Ok(Json(recommendations))
}
