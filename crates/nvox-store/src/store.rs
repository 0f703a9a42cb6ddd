//! Job status updates against the `videos` table.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use nvox_models::{truncate_error, JobId};

use crate::error::{StoreError, StoreResult};

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Postgres connection URL
    pub database_url: String,
    /// Pool size
    pub max_connections: u32,
}

impl StoreConfig {
    /// Create config from environment variables.
    ///
    /// `DATABASE_URL` is required; its absence is a startup error.
    pub fn from_env() -> StoreResult<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| StoreError::config("DATABASE_URL not set"))?,
            max_connections: std::env::var("STORE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        })
    }
}

/// Durable job store.
///
/// All three marks are idempotent with respect to queue redelivery:
/// they key on the job id and touch only their own columns.
#[derive(Clone)]
pub struct JobStore {
    pool: PgPool,
}

impl JobStore {
    /// Connect with the given configuration.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Connect from environment variables.
    pub async fn from_env() -> StoreResult<Self> {
        Self::connect(StoreConfig::from_env()?).await
    }

    /// Mark a job PROCESSING.
    ///
    /// Safe under redelivery: an existing start timestamp is preserved.
    pub async fn mark_processing(&self, id: &JobId) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE videos
            SET status = 'PROCESSING',
                started_at = COALESCE(started_at, NOW()),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;

        debug!(job_id = %id, "marked PROCESSING");
        Ok(())
    }

    /// Mark a job COMPLETE with its artifact location.
    pub async fn mark_complete(&self, id: &JobId, storage_key: &str) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE videos
            SET status = 'COMPLETE',
                storage_key = $1,
                progress = 100,
                completed_at = NOW(),
                updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(storage_key)
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;

        debug!(job_id = %id, "marked COMPLETE");
        Ok(())
    }

    /// Mark a job FAILED.
    ///
    /// The message is truncated to the column budget before binding.
    pub async fn mark_failed(&self, id: &JobId, error_message: &str) -> StoreResult<()> {
        let message = truncate_error(error_message);

        sqlx::query(
            r#"
            UPDATE videos
            SET status = 'FAILED',
                error_message = $1,
                updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(&message)
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;

        debug!(job_id = %id, "marked FAILED");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_database_url() {
        // Only test in this binary that touches DATABASE_URL.
        std::env::remove_var("DATABASE_URL");
        assert!(matches!(StoreConfig::from_env(), Err(StoreError::Config(_))));

        std::env::set_var("DATABASE_URL", "postgres://localhost/narravox");
        let config = StoreConfig::from_env().unwrap();
        assert_eq!(config.max_connections, 5);
        std::env::remove_var("DATABASE_URL");
    }
}
