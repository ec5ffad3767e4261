//! Builders for the HTTP state from the configured storage.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use subscriptions::inbound::http::state::HttpState;
use subscriptions::outbound::memory::InMemoryCommerceRepository;
use subscriptions::outbound::persistence::{DbPool, DieselCommerceRepository};

/// Serve every resource from PostgreSQL when a pool is configured, otherwise
/// from a process-local in-memory store.
pub(crate) fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match db_pool {
        Some(pool) => {
            info!("serving records from PostgreSQL");
            HttpState::from_store(Arc::new(DieselCommerceRepository::new(
                pool.clone(),
                clock,
            )))
        }
        None => {
            warn!("no database configured; records are kept in memory and lost on exit");
            HttpState::from_store(Arc::new(InMemoryCommerceRepository::new(clock)))
        }
    };
    web::Data::new(state)
}
