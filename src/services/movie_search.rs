use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::AppResult,
    models::{MovieRecord, MovieSearch, RawMovie},
    services::{catalog::MovieCatalog, join::with_deadline, normalizer::normalize},
};

/// Searches the catalog and returns normalized movies
///
/// The catalog's text search ignores rating filters, so when a text query and
/// a minimum rating are both given the rating is applied here. Movies with no
/// rating count as 0.
pub async fn search_movies(
    catalog: Arc<dyn MovieCatalog>,
    search: &MovieSearch,
    deadline: Duration,
) -> AppResult<Vec<MovieRecord>> {
    let page = with_deadline(deadline, catalog.search_movies(search)).await?;

    let movies: Vec<MovieRecord> = page
        .results
        .iter()
        .filter(|movie| meets_rating(search, movie))
        .map(normalize)
        .collect();

    tracing::info!(
        query = ?search.text_query(),
        genre = ?search.genre,
        year = ?search.year,
        results = movies.len(),
        provider = catalog.name(),
        "Movie search completed"
    );

    Ok(movies)
}

/// First page of the catalog's popular movies, normalized
pub async fn popular_movies(
    catalog: Arc<dyn MovieCatalog>,
    deadline: Duration,
) -> AppResult<Vec<MovieRecord>> {
    let page = with_deadline(deadline, catalog.popular_movies(1)).await?;
    Ok(page.results.iter().map(normalize).collect())
}

fn meets_rating(search: &MovieSearch, movie: &RawMovie) -> bool {
    match (search.text_query(), search.min_rating) {
        (Some(_), Some(min_rating)) => movie.vote_average.unwrap_or(0.0) >= min_rating,
        _ => true,
    }
}
