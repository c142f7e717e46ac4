use std::future::Future;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::error::{AppError, AppResult};

/// Runs one external call under a deadline
///
/// Expiry is reported as `AppError::Timeout` instead of waiting indefinitely.
pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(deadline)),
    }
}

/// Runs every call concurrently and waits for all of them
///
/// Each call is spawned onto a `JoinSet` under its own deadline. Results come
/// back in submission order. The first failure aborts every call still in
/// flight and is returned as-is; no partial result is produced.
pub async fn join_all_or_abort<T, F>(calls: Vec<F>, deadline: Duration) -> AppResult<Vec<T>>
where
    T: Send + 'static,
    F: Future<Output = AppResult<T>> + Send + 'static,
{
    let total = calls.len();
    let mut set = JoinSet::new();

    for (index, call) in calls.into_iter().enumerate() {
        set.spawn(async move { (index, with_deadline(deadline, call).await) });
    }

    let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, Ok(value))) => slots[index] = Some(value),
            Ok((index, Err(e))) => {
                tracing::warn!(
                    error = %e,
                    failed_index = index,
                    outstanding = set.len(),
                    "Concurrent call failed, aborting siblings"
                );
                set.abort_all();
                return Err(e);
            }
            Err(join_error) => {
                set.abort_all();
                return Err(AppError::Internal(format!(
                    "Task join error: {}",
                    join_error
                )));
            }
        }
    }

    slots
        .into_iter()
        .map(|slot| slot.ok_or_else(|| AppError::Internal("Missing task result".to_string())))
        .collect()
}
