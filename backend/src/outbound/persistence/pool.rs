//! Connection pool shared by the Diesel repositories.
//!
//! Wraps `diesel-async`'s `bb8` integration. Every repository call checks out
//! one connection, so cascades triggered by a single `DELETE` run on the
//! same session and inside the statement's implicit transaction.

use std::time::Duration;

use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use tracing::debug;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// A checkout failure carrying bb8's message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// A pool construction failure, including rejected sizing.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Sizing and timeout settings for the repositories' shared pool.
///
/// Usually produced by `SchemaSettings::pool_config`, which rejects sizes
/// the pool cannot honour before any connection is attempted.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use social_schema::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://social@localhost/social")
///     .with_max_size(20)
///     .with_min_idle(Some(5))
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 20);
/// assert!(config.check_sizes().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Start from the `SchemaSettings` defaults: ten connections, two kept
    /// idle, and a thirty second checkout timeout.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    #[must_use]
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    #[must_use]
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    #[must_use]
    pub fn min_idle(&self) -> Option<u32> {
        self.min_idle
    }

    #[must_use]
    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    /// Reject sizes bb8 would panic on: an empty pool, or more idle
    /// connections than the pool may hold.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` describing the offending sizes.
    pub fn check_sizes(&self) -> Result<(), PoolError> {
        if self.max_size == 0 {
            return Err(PoolError::build("max_size must be greater than zero"));
        }
        match self.min_idle {
            Some(min_idle) if min_idle > self.max_size => Err(PoolError::build(format!(
                "min_idle ({min_idle}) must not exceed max_size ({})",
                self.max_size
            ))),
            _ => Ok(()),
        }
    }
}

/// PostgreSQL pool handed to every `Diesel*Repository`.
///
/// Cloning shares the underlying pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` when the sizes fail
    /// [`PoolConfig::check_sizes`] or bb8 cannot construct the pool.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.check_sizes()?;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
        debug!(
            max_size = config.max_size,
            min_idle = ?config.min_idle,
            "building connection pool"
        );

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out one connection for a repository call.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` when no connection frees up within the
    /// configured timeout.
    pub async fn get(
        &self,
    ) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
