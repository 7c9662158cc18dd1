use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// Errors from the connection provider and the repositories built on it
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens one PostgreSQL connection per operation. There is no pool: every
/// call to [`Connector::run`] connects, pings, runs, and closes.
#[derive(Debug, Clone)]
pub struct Connector {
    options: PgConnectOptions,
    slow_threshold: Duration,
}

impl Connector {
    /// Build connect options from config. Never touches the network.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = match &config.url {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?,
            None => PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.name),
        };

        Ok(Self {
            options,
            slow_threshold: Duration::from_millis(config.slow_query_threshold_ms),
        })
    }

    pub fn options(&self) -> &PgConnectOptions {
        &self.options
    }

    /// Connect and verify liveness. The caller owns the connection and must
    /// close it; prefer [`Connector::run`] which does that on every path.
    pub async fn open(&self) -> Result<PgConnection, DatabaseError> {
        let mut conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(DatabaseError::Connect)?;

        if let Err(e) = conn.ping().await {
            let _ = conn.close().await;
            return Err(DatabaseError::Connect(e));
        }

        Ok(conn)
    }

    /// Run a single logical operation on a fresh connection, closing it
    /// exactly once afterwards regardless of the outcome.
    pub async fn run<T, E, F>(&self, op: F) -> Result<T, E>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, E>>,
        E: From<DatabaseError>,
    {
        let mut conn = self.open().await?;

        let started = Instant::now();
        let result = op(&mut conn).await;
        let elapsed = started.elapsed();

        if elapsed >= self.slow_threshold {
            warn!(elapsed_ms = elapsed.as_millis() as u64, "slow database operation");
        } else {
            debug!(elapsed_ms = elapsed.as_millis() as u64, "database operation finished");
        }

        if let Err(e) = conn.close().await {
            warn!(error = %e, "database connection did not close cleanly");
        }

        result
    }

    /// Open, ping and close a connection
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        let conn = self.open().await?;
        conn.close().await?;
        Ok(())
    }
}
