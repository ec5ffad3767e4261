//! Server settings loaded via OrthoConfig.
//!
//! Values come from `SUBSCRIPTIONS_*` environment variables, command-line
//! flags or a configuration file, in OrthoConfig's usual precedence order.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings that cannot be turned into a running server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
}

/// Configuration values for the HTTP server and its storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUBSCRIPTIONS")]
pub struct ServerSettings {
    /// Socket address to listen on; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one, records live in memory.
    pub database_url: Option<String>,
    /// Upper bound of pooled connections.
    pub db_max_connections: Option<u32>,
    /// Idle connections the pool keeps open.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connection_timeout_secs: Option<u64>,
    /// Apply pending schema migrations at startup.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Serve Swagger UI at `/docs`; defaults to on in debug builds.
    pub swagger_ui: Option<bool>,
}

impl ServerSettings {
    /// The socket address to bind.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Pool settings, when a database is configured.
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let timeout = self
            .db_connection_timeout_secs
            .map_or(DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs);
        Some(
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_MAX_SIZE))
                .with_min_idle(self.db_min_idle)
                .with_connection_timeout(timeout),
        )
    }

    /// Whether Swagger UI is mounted.
    #[must_use]
    pub fn swagger_ui(&self) -> bool {
        self.swagger_ui.unwrap_or(cfg!(debug_assertions))
    }
}
