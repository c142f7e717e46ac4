use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{Genre, MovieRecord},
    services::{
        aggregator::aggregate_history,
        builder::{build_recommendation_set, RecommendationSet},
        candidates::fetch_candidates,
        catalog::MovieCatalog,
        history::HistoryStore,
        ranker::rank_genres,
    },
};

/// Outcome of one recommendation request
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    /// Users whose histories were combined, requesting user first
    pub user_ids: Vec<String>,
    /// Genres that drove candidate fetching; empty means popular movies were used
    pub genres: Vec<Genre>,
    pub movies: RecommendationSet,
}

/// Generates recommendations for one user or a group
///
/// Personal and group recommendations run through the same pipeline: history
/// aggregation, genre ranking, candidate fetching, then set building. A
/// failure at any stage fails the request; partial sets are never returned.
#[derive(Clone)]
pub struct RecommendationPipeline {
    history: Arc<dyn HistoryStore>,
    catalog: Arc<dyn MovieCatalog>,
    deadline: Duration,
}

impl RecommendationPipeline {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        catalog: Arc<dyn MovieCatalog>,
        deadline: Duration,
    ) -> Self {
        Self {
            history,
            catalog,
            deadline,
        }
    }

    /// Recommendations for `user_id`, optionally joined by friends
    pub async fn recommend_for(
        &self,
        user_id: &str,
        friend_ids: &[String],
    ) -> AppResult<Recommendations> {
        let user_ids = group_members(user_id, friend_ids)?;
        let (genres, candidates) = self.gather(&user_ids).await?;
        let movies = build_recommendation_set(candidates, &mut rand::thread_rng());
        Ok(self.finish(user_ids, genres, movies))
    }

    /// Same as `recommend_for` with a caller-supplied shuffle source
    pub(crate) async fn recommend_with_rng<R: Rng + Send>(
        &self,
        user_ids: &[String],
        rng: &mut R,
    ) -> AppResult<Recommendations> {
        let user_ids = match user_ids.split_first() {
            Some((first, rest)) => group_members(first, rest)?,
            None => {
                return Err(AppError::InvalidInput(
                    "At least one user is required".to_string(),
                ))
            }
        };
        let (genres, candidates) = self.gather(&user_ids).await?;
        let movies = build_recommendation_set(candidates, rng);
        Ok(self.finish(user_ids, genres, movies))
    }

    async fn gather(&self, user_ids: &[String]) -> AppResult<(Vec<Genre>, Vec<MovieRecord>)> {
        let history = aggregate_history(self.history.clone(), user_ids, self.deadline).await?;
        let genres = rank_genres(&history);
        let candidates = fetch_candidates(self.catalog.clone(), &genres, self.deadline).await?;
        Ok((genres, candidates))
    }

    fn finish(
        &self,
        user_ids: Vec<String>,
        genres: Vec<Genre>,
        movies: RecommendationSet,
    ) -> Recommendations {
        tracing::info!(
            user_count = user_ids.len(),
            genres = ?genres,
            recommended = movies.len(),
            "Recommendations generated"
        );

        Recommendations {
            user_ids,
            genres,
            movies,
        }
    }
}

/// Requesting user followed by distinct friends, blanks and repeats removed
fn group_members(user_id: &str, friend_ids: &[String]) -> AppResult<Vec<String>> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::InvalidInput("User ID is required".to_string()));
    }

    let mut members = vec![user_id.to_string()];
    for friend in friend_ids.iter().map(|f| f.trim()) {
        if !friend.is_empty() && !members.iter().any(|m| m == friend) {
            members.push(friend.to_string());
        }
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogPage, MovieId, RawMovie, WatchHistoryEntry};
    use crate::services::builder::MAX_RECOMMENDATIONS;
    use crate::services::catalog::MockMovieCatalog;
    use crate::services::history::MockHistoryStore;
    use chrono::Utc;
    use mockall::predicate::eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const DEADLINE: Duration = Duration::from_secs(5);

    fn entry(user_id: &str, movie_id: u64, genres: &[&str]) -> WatchHistoryEntry {
        WatchHistoryEntry {
            user_id: user_id.to_string(),
            movie_id: MovieId::Numeric(movie_id),
            title: format!("Movie {}", movie_id),
            poster_url: None,
            synopsis: None,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            watched_at: Utc::now(),
        }
    }

    fn page(range: std::ops::Range<u64>) -> CatalogPage {
        CatalogPage {
            page: 1,
            results: range
                .map(|id| RawMovie {
                    id: MovieId::Numeric(id),
                    title: Some(format!("Candidate {}", id)),
                    original_title: None,
                    poster_path: None,
                    overview: Some("...".to_string()),
                    release_date: None,
                    genre_ids: Some(vec![18]),
                    genres: None,
                    vote_average: Some(7.0),
                })
                .collect(),
        }
    }

    fn users(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|u| u.to_string()).collect()
    }

    fn pipeline(history: MockHistoryStore, catalog: MockMovieCatalog) -> RecommendationPipeline {
        RecommendationPipeline::new(Arc::new(history), Arc::new(catalog), DEADLINE)
    }

    #[test]
    fn test_group_members_dedupes_and_orders() {
        let members = group_members(" me ", &users(&["f1", "me", "", "f2", "f1"])).unwrap();
        assert_eq!(members, users(&["me", "f1", "f2"]));
    }

    #[test]
    fn test_group_members_requires_user() {
        assert!(matches!(
            group_members("  ", &users(&["f1"])),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_group_with_one_empty_history() {
        let mut history = MockHistoryStore::new();
        history.expect_get_history().returning(|user_id| match user_id {
            "a" => Ok(vec![]),
            _ => Ok(vec![entry("b", 1, &["Drama"])]),
        });
        history.expect_name().return_const("mock");

        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_discover_by_genre()
            .with(eq(Genre::Drama), eq(1))
            .times(1)
            .returning(|_, _| Ok(page(100..105)));
        catalog.expect_popular_movies().never();
        catalog.expect_name().return_const("mock");

        let mut rng = StdRng::seed_from_u64(3);
        let result = pipeline(history, catalog)
            .recommend_with_rng(&users(&["a", "b"]), &mut rng)
            .await
            .unwrap();

        assert_eq!(result.user_ids, users(&["a", "b"]));
        assert_eq!(result.genres, vec![Genre::Drama]);
        assert_eq!(result.movies.len(), 5);
    }

    #[tokio::test]
    async fn test_personal_without_history_uses_popular() {
        let mut history = MockHistoryStore::new();
        history
            .expect_get_history()
            .times(1)
            .returning(|_| Ok(vec![entry("me", 1, &[]), entry("me", 2, &["Anime"])]));
        history.expect_name().return_const("mock");

        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_popular_movies()
            .times(1)
            .returning(|_| Ok(page(0..20)));
        catalog.expect_discover_by_genre().never();
        catalog.expect_name().return_const("mock");

        let result = pipeline(history, catalog)
            .recommend_for("me", &[])
            .await
            .unwrap();

        assert!(result.genres.is_empty());
        assert_eq!(result.movies.len(), MAX_RECOMMENDATIONS);
    }

    #[tokio::test]
    async fn test_overlapping_genres_never_duplicate() {
        let mut history = MockHistoryStore::new();
        history.expect_get_history().returning(|user_id| {
            Ok(vec![
                entry(user_id, 1, &["Action", "Comedy"]),
                entry(user_id, 2, &["Action", "Horror"]),
            ])
        });
        history.expect_name().return_const("mock");

        // Every genre returns the same eight movies
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_discover_by_genre()
            .times(3)
            .returning(|_, _| Ok(page(0..8)));
        catalog.expect_name().return_const("mock");

        let mut rng = StdRng::seed_from_u64(11);
        let result = pipeline(history, catalog)
            .recommend_with_rng(&users(&["a", "b"]), &mut rng)
            .await
            .unwrap();

        assert_eq!(result.genres, vec![Genre::Action, Genre::Comedy, Genre::Horror]);
        let unique: HashSet<MovieId> = result.movies.iter().map(|m| m.id.clone()).collect();
        assert_eq!(result.movies.len(), 8);
        assert_eq!(unique.len(), 8);
    }

    #[tokio::test]
    async fn test_failed_history_fetch_skips_ranking_and_catalog() {
        let mut history = MockHistoryStore::new();
        history.expect_get_history().returning(|user_id| match user_id {
            "a" => Ok(vec![entry("a", 1, &["Drama"])]),
            _ => Err(AppError::NotAvailable("unreachable".to_string())),
        });
        history.expect_name().return_const("mock");

        let mut catalog = MockMovieCatalog::new();
        catalog.expect_discover_by_genre().never();
        catalog.expect_popular_movies().never();

        let err = pipeline(history, catalog)
            .recommend_for("a", &users(&["b"]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotAvailable(_)));
    }

    #[tokio::test]
    async fn test_catalog_failure_returns_no_partial_set() {
        let mut history = MockHistoryStore::new();
        history
            .expect_get_history()
            .returning(|_| Ok(vec![entry("a", 1, &["Drama", "War"])]));
        history.expect_name().return_const("mock");

        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_discover_by_genre()
            .returning(|genre, _| match genre {
                Genre::War => Err(AppError::RateLimited),
                _ => Ok(page(0..5)),
            });
        catalog.expect_name().return_const("mock");

        let err = pipeline(history, catalog)
            .recommend_for("a", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::RateLimited));
    }

    #[tokio::test]
    async fn test_empty_user_list_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = pipeline(MockHistoryStore::new(), MockMovieCatalog::new())
            .recommend_with_rng(&[], &mut rng)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
