//! Backend entry-point: loads settings, prepares storage and serves the REST
//! API with its health probes and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use subscriptions::inbound::http::health::HealthState;
use subscriptions::outbound::persistence::{DbPool, run_migrations};
use subscriptions::settings::ServerSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr).with_swagger_ui(settings.swagger_ui());

    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            run_migrations(pool_config.database_url())
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
