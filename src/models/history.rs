use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MovieId;

/// A movie a user marked as watched
///
/// `watched_at` is assigned by the history store when the entry is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchHistoryEntry {
    pub user_id: String,
    pub movie_id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub synopsis: Option<String>,
    /// Genre names as recorded at write time; may include names outside the genre table
    pub genres: Vec<String>,
    pub watched_at: DateTime<Utc>,
}

/// History entry as submitted by a client, before the store stamps it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHistoryEntry {
    pub user_id: String,
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl NewHistoryEntry {
    /// Stamps the entry with the time it was recorded
    pub fn into_entry(self, watched_at: DateTime<Utc>) -> WatchHistoryEntry {
        WatchHistoryEntry {
            user_id: self.user_id,
            movie_id: self.movie_id,
            title: self.title,
            poster_url: self.poster_url,
            synopsis: self.synopsis,
            genres: self.genres,
            watched_at,
        }
    }
}
