//! Postgres pool setup and schema bootstrap.

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::DatabaseConfig;

const SCHEMA: &str = include_str!("../migrations/0001_schema.sql");

/// Connect using `database.url`. Returns `None` when no URL is configured.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Option<PgPool>> {
    let Some(url) = cfg.url.as_deref() else {
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect(url)
        .await
        .context("failed to connect to Postgres")?;

    info!(max_connections = cfg.max_connections, "connected to Postgres");
    Ok(Some(pool))
}

/// Create missing tables and indexes. Idempotent.
pub async fn apply_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .context("failed to apply database schema")?;
    Ok(())
}

pub(crate) fn is_unavailable(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
    )
}
