use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::AppResult,
    models::WatchHistoryEntry,
    services::{history::HistoryStore, join::join_all_or_abort},
};

/// Fetches every user's history concurrently and concatenates the results
///
/// Users are concatenated in the order given and each user's entries keep the
/// store's order. Any failed fetch fails the whole aggregation and aborts the
/// fetches still in flight.
pub async fn aggregate_history(
    store: Arc<dyn HistoryStore>,
    user_ids: &[String],
    deadline: Duration,
) -> AppResult<Vec<WatchHistoryEntry>> {
    let calls: Vec<_> = user_ids
        .iter()
        .cloned()
        .map(|user_id| {
            let store = store.clone();
            async move { store.get_history(&user_id).await }
        })
        .collect();

    let histories = join_all_or_abort(calls, deadline).await?;
    let combined: Vec<WatchHistoryEntry> = histories.into_iter().flatten().collect();

    tracing::info!(
        user_count = user_ids.len(),
        entries = combined.len(),
        store = store.name(),
        "Aggregated watch history"
    );

    Ok(combined)
}
