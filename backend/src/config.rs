//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SOCIAL_SCHEMA_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::SelfFollowPolicy;
use crate::outbound::persistence::PoolConfig;

/// Errors raised when settings cannot be turned into runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A database command ran without a connection URL.
    #[error("database URL missing: set SOCIAL_SCHEMA_DATABASE_URL or --database-url")]
    MissingDatabaseUrl,
    /// `pool_max_size` would leave the pool without connections.
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
    /// `pool_min_idle` asks for more idle connections than the pool holds.
    #[error("pool_min_idle ({min_idle}) must not exceed pool_max_size ({max_size})")]
    MinIdleExceedsMaxSize { min_idle: u32, max_size: u32 },
}

/// Settings for the schema CLI and the adapters it wires up.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SOCIAL_SCHEMA")]
pub struct SchemaSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Minimum idle connections kept open.
    #[ortho_config(default = 2)]
    pub pool_min_idle: u32,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 30)]
    pub connect_timeout_secs: u64,
    /// Whether a user may follow themselves.
    #[ortho_config(default = true)]
    pub allow_self_follow: bool,
}

impl SchemaSettings {
    /// Return the configured database URL, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no non-empty URL is
    /// configured.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Build the connection pool configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is set,
    /// [`SettingsError::EmptyPool`] for a zero `pool_max_size`, and
    /// [`SettingsError::MinIdleExceedsMaxSize`] when the idle floor is above
    /// the pool size.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        if self.pool_max_size == 0 {
            return Err(SettingsError::EmptyPool);
        }
        if self.pool_min_idle > self.pool_max_size {
            return Err(SettingsError::MinIdleExceedsMaxSize {
                min_idle: self.pool_min_idle,
                max_size: self.pool_max_size,
            });
        }
        let config = PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size)
            .with_min_idle(Some(self.pool_min_idle))
            .with_connection_timeout(Duration::from_secs(self.connect_timeout_secs));
        Ok(config)
    }

    /// The self-follow policy these settings select.
    #[must_use]
    pub fn self_follow_policy(&self) -> SelfFollowPolicy {
        SelfFollowPolicy::from_allow_flag(self.allow_self_follow)
    }
}
