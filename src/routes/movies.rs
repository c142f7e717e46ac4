use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, MovieRecord, MovieSearch},
    routes::AppState,
    services::movie_search,
};

/// Raw search parameters; every field may be missing or empty
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    query: Option<String>,
    genre: Option<String>,
    year: Option<String>,
    rating: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl TryFrom<SearchQuery> for MovieSearch {
    type Error = AppError;

    fn try_from(params: SearchQuery) -> Result<Self, Self::Error> {
        let genre = non_empty(&params.genre).and_then(|name| {
            let genre = Genre::from_name_ignore_case(name);
            if genre.is_none() {
                tracing::debug!(genre = %name, "Ignoring unknown genre filter");
            }
            genre
        });

        let year = non_empty(&params.year)
            .map(|y| {
                y.parse::<u16>()
                    .map_err(|_| AppError::InvalidInput(format!("Invalid year: {}", y)))
            })
            .transpose()?;

        let min_rating = non_empty(&params.rating)
            .map(|r| match r.parse::<f64>() {
                Ok(rating) if (0.0..=10.0).contains(&rating) => Ok(rating),
                _ => Err(AppError::InvalidInput(format!("Invalid rating: {}", r))),
            })
            .transpose()?;

        Ok(MovieSearch {
            query: non_empty(&params.query).map(str::to_string),
            genre,
            year,
            min_rating,
        })
    }
}

/// Handler for movie search endpoint
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<MovieRecord>>> {
    let search = MovieSearch::try_from(params)?;
    let movies =
        movie_search::search_movies(state.catalog.clone(), &search, state.request_timeout).await?;
    Ok(Json(movies))
}

/// Handler for popular movies endpoint
pub async fn popular(State(state): State<AppState>) -> AppResult<Json<Vec<MovieRecord>>> {
    let movies = movie_search::popular_movies(state.catalog.clone(), state.request_timeout).await?;
    Ok(Json(movies))
}
