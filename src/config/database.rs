use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::repository::COLLECTIONS;

pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Database connection validation failed: {}", e))?;

    Ok(pool)
}

/// Creates one document table per collection if missing.
pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    for (table, unique_field) in COLLECTIONS {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id UUID PRIMARY KEY,
                seq BIGSERIAL NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                doc JSONB NOT NULL
            )"
        );
        sqlx::query(&ddl).execute(pool).await?;

        let index = format!("CREATE INDEX IF NOT EXISTS {table}_seq_idx ON {table} (seq)");
        sqlx::query(&index).execute(pool).await?;

        if let Some(field) = unique_field {
            let unique = format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {table}_{field}_key ON {table} ((doc ->> '{field}'))"
            );
            sqlx::query(&unique).execute(pool).await?;
        }
    }

    tracing::info!(tables = COLLECTIONS.len(), "Database schema ready");
    Ok(())
}
