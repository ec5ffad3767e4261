//! Shared HTTP adapter state.
//!
//! Handlers receive this state through `actix_web::web::Data` and only see the
//! storage port, so they stay testable with in-memory or mocked adapters.

use std::sync::Arc;

use crate::domain::ports::ResourceRepository;
use crate::domain::{Brands, Customers, Offers, Orders, Products};

/// Storage ports used by the HTTP handlers, one per resource.
#[derive(Clone)]
pub struct HttpState {
    pub brands: Arc<dyn ResourceRepository<Brands>>,
    pub products: Arc<dyn ResourceRepository<Products>>,
    pub offers: Arc<dyn ResourceRepository<Offers>>,
    pub customers: Arc<dyn ResourceRepository<Customers>>,
    pub orders: Arc<dyn ResourceRepository<Orders>>,
}

impl HttpState {
    /// Serve every resource from one store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use subscriptions::inbound::http::state::HttpState;
    /// use subscriptions::outbound::memory::InMemoryCommerceRepository;
    ///
    /// let store = InMemoryCommerceRepository::new(Arc::new(mockable::DefaultClock));
    /// let state = HttpState::from_store(Arc::new(store));
    /// # let _ = state;
    /// ```
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ResourceRepository<Brands>
            + ResourceRepository<Products>
            + ResourceRepository<Offers>
            + ResourceRepository<Customers>
            + ResourceRepository<Orders>
            + 'static,
    {
        Self {
            brands: store.clone(),
            products: store.clone(),
            offers: store.clone(),
            customers: store.clone(),
            orders: store,
        }
    }
}
