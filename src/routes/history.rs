use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::{MovieId, NewHistoryEntry, WatchHistoryEntry},
    routes::AppState,
    services::join::with_deadline,
};

#[derive(Debug, Deserialize)]
pub struct AddHistoryRequest {
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct WatchedResponse {
    pub watched: bool,
}

/// Get a user's watch history
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<WatchHistoryEntry>>> {
    let history = with_deadline(state.request_timeout, state.history.get_history(&user_id)).await?;
    Ok(Json(history))
}

/// Record a watched movie
pub async fn add(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<AddHistoryRequest>,
) -> AppResult<(StatusCode, Json<WatchHistoryEntry>)> {
    let entry = NewHistoryEntry {
        user_id,
        movie_id: request.movie_id,
        title: request.title,
        poster_url: request.poster_url,
        synopsis: request.synopsis,
        genres: request.genres,
    };
    let entry = with_deadline(state.request_timeout, state.history.add_to_history(entry)).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Check whether a user has watched a movie
pub async fn watched(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(String, String)>,
) -> AppResult<Json<WatchedResponse>> {
    let movie_id = MovieId::from_text(&movie_id);
    let watched = with_deadline(
        state.request_timeout,
        state.history.has_watched(&user_id, &movie_id),
    )
    .await?;
    Ok(Json(WatchedResponse { watched }))
}
