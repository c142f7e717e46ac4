use std::collections::HashMap;

use crate::models::{Genre, WatchHistoryEntry};

/// Number of genres that drive candidate fetching
pub const TOP_GENRES: usize = 3;

/// Genre occurrence counts for one aggregation request
///
/// Genres are kept in first-seen order so that ranking ties resolve to the
/// genre encountered first in the history. Names outside the genre table are
/// skipped and only counted in `skipped`.
#[derive(Debug, Default, Clone)]
pub struct GenreFrequencyTable {
    counts: Vec<(Genre, usize)>,
    positions: HashMap<Genre, usize>,
    skipped: usize,
}

impl GenreFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every genre tag of every entry, in history order
    pub fn from_history(history: &[WatchHistoryEntry]) -> Self {
        let mut table = Self::new();
        for entry in history {
            for name in &entry.genres {
                table.record(name);
            }
        }
        table
    }

    /// Increments the count for `name`; returns false if the name is unknown
    pub fn record(&mut self, name: &str) -> bool {
        let Some(genre) = Genre::from_name(name) else {
            self.skipped += 1;
            return false;
        };

        match self.positions.get(&genre) {
            Some(&position) => self.counts[position].1 += 1,
            None => {
                self.positions.insert(genre, self.counts.len());
                self.counts.push((genre, 1));
            }
        }
        true
    }

    pub fn count(&self, genre: Genre) -> usize {
        self.positions
            .get(&genre)
            .map(|&position| self.counts[position].1)
            .unwrap_or(0)
    }

    /// Number of distinct known genres seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tags that did not match the genre table
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Up to `k` genres by descending count, ties in first-seen order
    pub fn top(&self, k: usize) -> Vec<Genre> {
        let mut ranked = self.counts.clone();
        // `sort_by` is stable, which is what keeps first-seen order on ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(k).map(|(genre, _)| genre).collect()
    }
}

/// Ranks the genres of a combined watch history
///
/// An empty result means the history carried no known genre; callers fall
/// back to popular movies.
pub fn rank_genres(history: &[WatchHistoryEntry]) -> Vec<Genre> {
    let table = GenreFrequencyTable::from_history(history);
    let ranked = table.top(TOP_GENRES);

    tracing::debug!(
        entries = history.len(),
        distinct_genres = table.len(),
        skipped_tags = table.skipped(),
        ranked = ?ranked,
        "Ranked genres"
    );

    ranked
}
