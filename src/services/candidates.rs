use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::AppResult,
    models::{Genre, MovieRecord},
    services::{
        catalog::MovieCatalog,
        join::{join_all_or_abort, with_deadline},
        normalizer::normalize_all,
    },
};

/// Only the first page of each listing feeds recommendations
pub const CANDIDATE_PAGE: u32 = 1;

/// Builds the candidate pool for a ranked genre list
///
/// With no genres a single popular-movies page is used. Otherwise one discover
/// request per genre runs concurrently; any failure fails the whole fetch.
/// Pages are normalized and concatenated in genre-rank order, so a movie that
/// ranks in two genres appears twice.
pub async fn fetch_candidates(
    catalog: Arc<dyn MovieCatalog>,
    genres: &[Genre],
    deadline: Duration,
) -> AppResult<Vec<MovieRecord>> {
    if genres.is_empty() {
        tracing::info!(
            provider = catalog.name(),
            "No ranked genres, falling back to popular movies"
        );
        let page = with_deadline(deadline, catalog.popular_movies(CANDIDATE_PAGE)).await?;
        return Ok(normalize_all(&page.results));
    }

    let calls: Vec<_> = genres
        .iter()
        .copied()
        .map(|genre| {
            let catalog = catalog.clone();
            async move { catalog.discover_by_genre(genre, CANDIDATE_PAGE).await }
        })
        .collect();

    let pages = join_all_or_abort(calls, deadline).await?;
    let candidates: Vec<MovieRecord> = pages
        .iter()
        .flat_map(|page| normalize_all(&page.results))
        .collect();

    tracing::info!(
        genre_count = genres.len(),
        candidates = candidates.len(),
        provider = catalog.name(),
        "Fetched candidate movies"
    );

    Ok(candidates)
}
