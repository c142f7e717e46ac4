use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{MovieId, NewHistoryEntry, WatchHistoryEntry},
    services::history::{require_user_id, HistoryStore},
};

/// Process-local history store, used when no database is configured
#[derive(Clone, Default)]
pub struct InMemoryHistoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<WatchHistoryEntry>>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn get_history(&self, user_id: &str) -> AppResult<Vec<WatchHistoryEntry>> {
        require_user_id(user_id)?;
        let entries = self.entries.read().await;
        Ok(entries.get(user_id).cloned().unwrap_or_default())
    }

    async fn add_to_history(&self, entry: NewHistoryEntry) -> AppResult<WatchHistoryEntry> {
        require_user_id(&entry.user_id)?;
        let mut entry = entry.into_entry(Utc::now());
        entry.movie_id = entry.movie_id.canonical();

        let mut entries = self.entries.write().await;
        let user_entries = entries.entry(entry.user_id.clone()).or_default();
        // Re-recording a movie moves it to the end, matching watched_at order
        user_entries.retain(|existing| existing.movie_id != entry.movie_id);
        user_entries.push(entry.clone());

        Ok(entry)
    }

    async fn has_watched(&self, user_id: &str, movie_id: &MovieId) -> AppResult<bool> {
        require_user_id(user_id)?;
        let movie_id = movie_id.canonical();
        let entries = self.entries.read().await;
        Ok(entries
            .get(user_id)
            .is_some_and(|list| list.iter().any(|e| e.movie_id == movie_id)))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
