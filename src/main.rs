use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_mates::{
    config::Config,
    db::{create_pool, create_redis_client, Cache},
    routes::{create_router, AppState},
    services::{HistoryStore, InMemoryHistoryStore, PostgresHistoryStore, TmdbCatalog},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_mates=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let history: Arc<dyn HistoryStore> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            tracing::info!("Watch history backed by Postgres");
            Arc::new(PostgresHistoryStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, watch history is kept in memory");
            Arc::new(InMemoryHistoryStore::new())
        }
    };

    let (cache, cache_writer) = match &config.redis_url {
        Some(redis_url) => {
            let (cache, writer) = Cache::new(create_redis_client(redis_url)?);
            tracing::info!("Catalog responses cached in Redis");
            (Some(cache), Some(writer))
        }
        None => {
            tracing::info!("REDIS_URL not set, catalog caching disabled");
            (None, None)
        }
    };

    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .context("Failed to build HTTP client")?;
    let catalog = Arc::new(TmdbCatalog::new(
        http_client,
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        cache,
    ));

    let state = AppState::new(history, catalog, config.request_timeout());
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Server running on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(writer) = cache_writer {
        writer.shutdown().await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
