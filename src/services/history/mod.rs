//! Watch history persistence
//!
//! The recommendation pipeline only reads history; the write side exists so
//! clients can record what they watched. `watched_at` is always stamped by the
//! store, never by the caller.

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, NewHistoryEntry, WatchHistoryEntry},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryHistoryStore;
pub use postgres::PostgresHistoryStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// All entries for a user in the order the store returns them
    ///
    /// Unknown users have an empty history; an unreachable store fails with
    /// `AppError::NotAvailable`.
    async fn get_history(&self, user_id: &str) -> AppResult<Vec<WatchHistoryEntry>>;

    /// Records a watched movie, replacing any earlier entry for the same movie
    async fn add_to_history(&self, entry: NewHistoryEntry) -> AppResult<WatchHistoryEntry>;

    async fn has_watched(&self, user_id: &str, movie_id: &MovieId) -> AppResult<bool>;

    fn name(&self) -> &'static str;
}

pub(crate) fn require_user_id(user_id: &str) -> AppResult<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::InvalidInput("User ID is required".to_string()));
    }
    Ok(())
}
