//! Database Connection Pool Module
//!
//! This module provides PostgreSQL connection pooling using deadpool-postgres
//! and the generic entity operations of [`DbClient`]. Statement text is built
//! in `crate::store` from whitelisted identifiers only; every value is a bound
//! parameter.

use crate::component::{Component, Relation};
use crate::error::{ApiError, ApiResult};
use crate::store;
use deadpool_postgres::{
    Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime, Timeouts,
};
use std::time::Duration;
use ticketry_core::{RowId, UpdateSet};
use tokio_postgres::NoTls;

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full connection string; takes precedence over the discrete fields
    pub url: Option<String>,
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// Connection timeout
    pub timeout: Duration,
    /// Create missing tables at startup
    pub bootstrap_schema: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            dbname: "ticketry".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
            bootstrap_schema: false,
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            host: std::env::var("TICKETRY_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("TICKETRY_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
            dbname: std::env::var("TICKETRY_DB_NAME").unwrap_or_else(|_| "ticketry".to_string()),
            user: std::env::var("TICKETRY_DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("TICKETRY_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("TICKETRY_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(16),
            timeout: Duration::from_secs(
                std::env::var("TICKETRY_DB_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            bootstrap_schema: std::env::var("TICKETRY_DB_BOOTSTRAP_SCHEMA")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(false),
        }
    }

    /// Create a connection pool from this configuration.
    ///
    /// No connection is opened here; the first checkout connects.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let mut cfg = Config::new();
        match &self.url {
            Some(url) => cfg.url = Some(url.clone()),
            None => {
                cfg.host = Some(self.host.clone());
                cfg.port = Some(self.port);
                cfg.dbname = Some(self.dbname.clone());
                cfg.user = Some(self.user.clone());
                cfg.password = Some(self.password.clone());
            }
        }

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut timeouts = Timeouts::default();
        timeouts.wait = Some(self.timeout);
        timeouts.create = Some(self.timeout);
        timeouts.recycle = Some(self.timeout);

        let mut pool_cfg = PoolConfig::new(self.max_size);
        pool_cfg.timeouts = timeouts;
        cfg.pool = Some(pool_cfg);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ApiError::database_error(format!("Failed to create pool: {}", e)))?;

        Ok(pool)
    }
}

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

/// Database client that wraps a connection pool.
///
/// Created once at startup, shared through the application state and closed
/// on shutdown.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get the current pool size for observability.
    pub fn pool_size(&self) -> usize {
        self.pool.status().size
    }

    /// Get a connection from the pool.
    pub async fn get_conn(&self) -> ApiResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// Close the pool; later checkouts fail with ServiceUnavailable.
    pub fn close(&self) {
        self.pool.close();
        tracing::info!("Database pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Health check - verifies database connectivity.
    pub async fn health_check(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;

        // Simple query to verify connectivity
        conn.query_one("SELECT 1", &[]).await?;

        Ok(())
    }

    // ========================================================================
    // GENERIC ROW OPERATIONS
    // ========================================================================

    /// Whether a row with `id` exists in the component's table.
    pub async fn exists<C: Component>(&self, id: RowId) -> ApiResult<bool> {
        let conn = self.get_conn().await?;
        store::exists(&conn, C::TABLE, id).await
    }

    /// Fetch rows by id, or every row when `ids` is `None`.
    pub async fn list<C: Component>(&self, ids: Option<&[RowId]>) -> ApiResult<Vec<C>> {
        let conn = self.get_conn().await?;
        store::fetch_by_ids::<C, _>(&conn, ids).await
    }

    /// Fetch one row, failing with NotFound when it is absent.
    pub async fn get<C: Component>(&self, id: RowId) -> ApiResult<C> {
        let conn = self.get_conn().await?;
        store::fetch_one::<C, _>(&conn, id)
            .await?
            .ok_or_else(|| C::not_found_error(id))
    }

    /// Apply a validated partial update and return the updated row.
    pub async fn update<C: Component>(&self, id: RowId, set: &UpdateSet) -> ApiResult<C> {
        let conn = self.get_conn().await?;
        store::update_row::<C, _>(&conn, id, set).await
    }

    /// Delete a row, failing with NotFound when it is absent.
    pub async fn delete<C: Component>(&self, id: RowId) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        store::delete_row(&conn, C::TABLE, id).await
    }

    /// Every row of a join table.
    pub async fn list_relations<R: Relation>(&self) -> ApiResult<Vec<R>> {
        let conn = self.get_conn().await?;
        store::fetch_relations::<R, _>(&conn).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DbConfig::default();
        assert!(config.url.is_none());
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "ticketry");
        assert_eq!(config.max_size, 16);
        assert!(!config.bootstrap_schema);
    }

    #[tokio::test]
    async fn test_pool_is_lazy_and_closable() -> ApiResult<()> {
        let config = DbConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            timeout: Duration::from_millis(200),
            ..DbConfig::default()
        };
        let db = DbClient::from_config(&config)?;
        assert_eq!(db.pool_size(), 0);

        db.close();
        assert!(db.is_closed());
        let err = db.health_check().await.err();
        assert_eq!(
            err.map(|e| e.code),
            Some(crate::error::ErrorCode::ServiceUnavailable)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_row_operations_check_out_a_pooled_connection() -> ApiResult<()> {
        use crate::error::ErrorCode;
        use ticketry_core::{Ticket, UserProject};

        let db = DbClient::from_config(&DbConfig::default())?;
        db.close();

        let codes = [
            db.exists::<Ticket>(1).await.err().map(|e| e.code),
            db.list::<Ticket>(Some(&[1, 2])).await.err().map(|e| e.code),
            db.get::<Ticket>(1).await.err().map(|e| e.code),
            db.delete::<Ticket>(1).await.err().map(|e| e.code),
            db.list_relations::<UserProject>().await.err().map(|e| e.code),
        ];
        for code in codes {
            assert_eq!(code, Some(ErrorCode::ServiceUnavailable));
        }
        Ok(())
    }
}
