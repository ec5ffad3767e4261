//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Every resource is served under [`resource::API_PREFIX`] with the same five
//! operations. Extractor failures (unreadable JSON bodies, query strings or
//! path identities) are reported with the shared error payload rather than
//! Actix's plain-text defaults.

pub mod brands;
pub mod customers;
pub mod error;
pub mod health;
pub mod offers;
pub mod orders;
pub mod products;
pub mod resource;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;
use tracing::debug;

pub use error::ApiResult;

use self::validation::{malformed_body_error, malformed_path_error, malformed_query_error};

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        malformed_body_error(err.to_string()).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected query string");
        malformed_query_error(err.to_string()).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected path");
        malformed_path_error(err.to_string()).into()
    })
}

/// Register every resource route under [`resource::API_PREFIX`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use subscriptions::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// # let _ = app;
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(resource::API_PREFIX)
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .configure(brands::configure)
            .configure(products::configure)
            .configure(offers::configure)
            .configure(customers::configure)
            .configure(orders::configure),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::test_utils::{memory_state, test_app};

    #[rstest]
    #[case("/api/v1/brands/abc", "malformed_path")]
    #[case("/api/v1/brands?pageNumber=first", "malformed_query")]
    #[case("/api/v1/products?isActive=maybe", "malformed_query")]
    #[actix_web::test]
    async fn extractor_failures_use_the_error_payload(#[case] uri: &str, #[case] code: &str) {
        let app = actix_test::init_service(test_app(memory_state())).await;

        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("code"), Some(&json!("invalid_request")));
        assert_eq!(body.pointer("/details/code"), Some(&json!(code)));
    }
}
