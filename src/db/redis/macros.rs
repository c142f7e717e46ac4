/// Read-through caching over an optional `Cache`.
///
/// Looks the key up first; on a miss (or when no cache is configured, or the
/// cache is unreachable) runs the block, queues the computed value for a
/// background write and returns it. Errors from the block propagate.
///
/// # Arguments
/// * `$cache`: an `Option<Cache>`.
/// * `$key`: the `CacheKey` for the value.
/// * `$ttl`: time-to-live in seconds.
/// * `$block`: future producing `AppResult<T>`.
///
/// # Example
/// ```rust,ignore
/// let page = cached!(self.cache, CacheKey::Popular { page: 1 }, 600, async move {
///     self.fetch_page("/movie/popular", &[]).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        let hit = match &$cache {
            Some(cache) => cache.lookup(&key).await,
            None => None,
        };
        match hit {
            Some(value) => {
                tracing::debug!(key = %key, "Cache hit");
                Ok(value)
            }
            None => match $block.await {
                Ok(value) => {
                    if let Some(cache) = &$cache {
                        cache.set_in_background(&key, &value, $ttl);
                    }
                    Ok(value)
                }
                Err(e) => Err(e),
            },
        }
    }};
}
