use sqlx::{postgres::PgPoolOptions, PgPool};

/// Creates a PostgreSQL connection pool and applies pending migrations
///
/// The pool backs the watch history store.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
