//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryCommerceRepository;

/// Clock frozen at 2024-03-01 08:00 UTC.
pub struct FixtureClock;

impl FixtureClock {
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        Self::now().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Self::now()
    }
}

/// State serving every resource from one empty in-memory store.
pub fn memory_state() -> HttpState {
    HttpState::from_store(Arc::new(InMemoryCommerceRepository::new(Arc::new(
        FixtureClock,
    ))))
}

/// Application exposing the resource API over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_api)
}

/// Read a string field of a JSON payload.
pub fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}
