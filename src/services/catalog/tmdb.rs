//! TMDB (The Movie Database) catalog provider
//!
//! Uses TMDB API v3 list endpoints, all of which return `{ page, results }`:
//! 1. Discover: /discover/movie?with_genres={id}&sort_by=popularity.desc
//! 2. Popular: /movie/popular
//! 3. Search: /search/movie?query=... (or /discover/movie when only filters are given)

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{CatalogPage, Genre, MovieSearch},
    services::catalog::MovieCatalog,
};
use reqwest::{Client as HttpClient, StatusCode};

const DISCOVER_CACHE_TTL: u64 = 3600; // 1 hour
const POPULAR_CACHE_TTL: u64 = 3600; // 1 hour
const SEARCH_CACHE_TTL: u64 = 900; // 15 minutes
const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Option<Cache>,
}

impl TmdbCatalog {
    pub fn new(
        http_client: HttpClient,
        api_key: String,
        api_url: String,
        cache: Option<Cache>,
    ) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Fetches one list page and decodes it
    async fn fetch_page(&self, path: &str, params: &[(&str, String)]) -> AppResult<CatalogPage> {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(url = %url, "TMDB request");

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(path = %path, "TMDB rate limit hit");
            return Err(AppError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(path = %path, status = %status, body = %body, "TMDB request failed");
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let page: CatalogPage = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, path = %path, "Failed to deserialize TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        tracing::info!(
            path = %path,
            results = page.results.len(),
            provider = "tmdb",
            "Catalog page fetched"
        );

        Ok(page)
    }
}

/// Endpoint and query parameters for a search
///
/// A text query goes to `/search/movie`; filters alone go to `/discover/movie`.
/// Filters are forwarded in both cases.
pub(crate) fn search_request(search: &MovieSearch) -> (&'static str, Vec<(&'static str, String)>) {
    let mut params = Vec::new();

    let path = match search.text_query() {
        Some(query) => {
            params.push(("query", query.to_string()));
            "/search/movie"
        }
        None => "/discover/movie",
    };

    if let Some(year) = search.year {
        params.push(("primary_release_year", year.to_string()));
    }
    if let Some(genre) = search.genre {
        params.push(("with_genres", genre.id().to_string()));
    }
    if let Some(rating) = search.min_rating {
        params.push(("vote_average.gte", rating.to_string()));
    }

    (path, params)
}

fn search_cache_key(path: &str, params: &[(&str, String)]) -> CacheKey {
    let filters: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    CacheKey::Search(format!("{}?{}", path, filters.join("&")))
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn discover_by_genre(&self, genre: Genre, page: u32) -> AppResult<CatalogPage> {
        cached!(
            self.cache,
            CacheKey::Discover {
                genre_id: genre.id(),
                page,
            },
            DISCOVER_CACHE_TTL,
            async move {
                self.fetch_page(
                    "/discover/movie",
                    &[
                        ("with_genres", genre.id().to_string()),
                        ("sort_by", "popularity.desc".to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await
            }
        )
    }

    async fn popular_movies(&self, page: u32) -> AppResult<CatalogPage> {
        cached!(
            self.cache,
            CacheKey::Popular { page },
            POPULAR_CACHE_TTL,
            async move {
                self.fetch_page("/movie/popular", &[("page", page.to_string())])
                    .await
            }
        )
    }

    async fn search_movies(&self, search: &MovieSearch) -> AppResult<CatalogPage> {
        let (path, params) = search_request(search);

        cached!(
            self.cache,
            search_cache_key(path, &params),
            SEARCH_CACHE_TTL,
            async { self.fetch_page(path, &params).await }
        )
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
