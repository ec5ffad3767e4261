//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use subscriptions::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) swagger_ui: bool,
}

impl ServerConfig {
    /// Configuration serving records from memory, without Swagger UI.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            swagger_ui: false,
        }
    }

    /// Serve records from PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Mount Swagger UI at `/docs`.
    #[must_use]
    pub fn with_swagger_ui(mut self, enabled: bool) -> Self {
        self.swagger_ui = enabled;
        self
    }
}
