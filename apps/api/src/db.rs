use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Connection pool for the career guidance tables.
/// Every stage shares this pool; there are no per-stage connections.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        // Inference calls can hold a request open for minutes; don't let
        // pool acquisition time out underneath them.
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;

    info!("PostgreSQL pool ready");
    Ok(pool)
}
