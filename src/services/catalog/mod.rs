//! Movie catalog abstraction
//!
//! The recommendation pipeline only needs three catalog operations: discover
//! by genre, popular listing and filtered search. Implementations return raw
//! catalog pages; normalization happens in the services that consume them.

use crate::{
    error::AppResult,
    models::{CatalogPage, Genre, MovieSearch},
};

pub mod tmdb;

pub use tmdb::TmdbCatalog;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Movies in one genre, sorted by descending popularity
    async fn discover_by_genre(&self, genre: Genre, page: u32) -> AppResult<CatalogPage>;

    /// The catalog's popular movies listing
    async fn popular_movies(&self, page: u32) -> AppResult<CatalogPage>;

    /// Text search, or filtered discovery when no text query is given
    async fn search_movies(&self, search: &MovieSearch) -> AppResult<CatalogPage>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
