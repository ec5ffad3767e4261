//! End-to-end behaviour of the resource routes over the in-memory store.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;
use serde_json::{Value, json};

use subscriptions::Trace;
use subscriptions::inbound::http::configure_api;
use subscriptions::inbound::http::state::HttpState;
use subscriptions::outbound::memory::InMemoryCommerceRepository;

struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }
}

async fn service() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let store = Arc::new(InMemoryCommerceRepository::new(Arc::new(FixedClock)));
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::from_store(store)))
            .wrap(Trace)
            .configure(configure_api),
    )
    .await
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

async fn create(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    collection: &str,
    body: Value,
) -> Value {
    let (status, created) = send(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/{collection}"))
            .set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create {collection}: {created}");
    created
}

async fn seed_catalogue(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) {
    create(app, "brands", json!({ "name": "Acme" })).await;
    create(
        app,
        "products",
        json!({ "name": "Gym", "isActive": true, "term": "monthly", "brandId": 1 }),
    )
    .await;
    create(
        app,
        "offers",
        json!({ "productId": 1, "description": "Quarter", "price": 29.99, "numberOfTerms": 3 }),
    )
    .await;
    create(
        app,
        "customers",
        json!({ "emailAddress": "ada@example.com", "firstName": "Ada", "lastName": "Lovelace" }),
    )
    .await;
}

#[rstest]
#[case(1, 10, true, false)]
#[case(3, 5, false, true)]
#[case(4, 0, false, true)]
#[actix_web::test]
async fn pages_through_twenty_five_brands(
    #[case] page: u64,
    #[case] items: usize,
    #[case] has_next: bool,
    #[case] has_previous: bool,
) {
    let app = service().await;
    for index in 1..=25 {
        create(&app, "brands", json!({ "name": format!("Brand {index:02}") })).await;
    }

    let (status, body) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/brands?pageNumber={page}&pageSize=10")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.get("items").and_then(Value::as_array).map(Vec::len),
        Some(items)
    );
    assert_eq!(body.get("totalCount"), Some(&json!(25)));
    assert_eq!(body.get("totalPages"), Some(&json!(3)));
    assert_eq!(body.get("hasNextPage"), Some(&json!(has_next)));
    assert_eq!(body.get("hasPreviousPage"), Some(&json!(has_previous)));
}

#[actix_web::test]
async fn subscription_lifecycle() {
    let app = service().await;
    seed_catalogue(&app).await;

    let order = create(
        &app,
        "orders",
        json!({ "offerId": 1, "customerId": 1, "startDate": "2024-01-31" }),
    )
    .await;
    assert_eq!(order.get("endDate"), Some(&json!("2024-04-30T00:00:00Z")));

    let (status, paid) = send(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/orders/1")
            .set_json(json!({ "paid": true, "cancelled": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid.get("paid"), Some(&json!(true)));

    let (_, subscribers) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/customers?offerId=1"),
    )
    .await;
    assert_eq!(subscribers.pointer("/items/0/emailAddress"), Some(&json!("ada@example.com")));

    let (status, cancelled) = send(&app, actix_test::TestRequest::delete().uri("/api/v1/orders/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled, json!(1));

    let (_, order) = send(&app, actix_test::TestRequest::get().uri("/api/v1/orders/1")).await;
    assert_eq!(order.get("cancelled"), Some(&json!(true)));
    assert_eq!(order.get("paid"), Some(&json!(true)));
}

#[rstest]
#[case("brands/1", "Brand with id = 1 can't be deleted (referenced by some Product)")]
#[case("products/1", "Product with id = 1 can't be deleted (referenced by some Offer)")]
#[case("offers/1", "Offer with id = 1 can't be deleted (referenced by some Order)")]
#[case("customers/1", "Customer with id = 1 can't be deleted (referenced by some Order)")]
#[actix_web::test]
async fn referenced_records_cannot_be_deleted(#[case] path: &str, #[case] message: &str) {
    let app = service().await;
    seed_catalogue(&app).await;
    create(&app, "orders", json!({ "offerId": 1, "customerId": 1 })).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::delete().uri(&format!("/api/v1/{path}")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.get("message"), Some(&json!(message)));
    assert_eq!(body.pointer("/details/code"), Some(&json!("business_rule")));
}

#[actix_web::test]
async fn refused_product_leaves_no_row() {
    let app = service().await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/products").set_json(json!({
            "name": "Gym",
            "isActive": true,
            "term": "monthly",
            "brandId": 2_147_483_647,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.get("message"),
        Some(&json!("Brand with id = 2147483647 does not exist"))
    );

    let (_, listing) = send(&app, actix_test::TestRequest::get().uri("/api/v1/products")).await;
    assert_eq!(listing.get("totalCount"), Some(&json!(0)));
}

#[actix_web::test]
async fn errors_carry_the_request_trace_id() {
    let app = service().await;
    let trace_id = "6f1d7a9e-3c1b-4f7e-9a55-0c4ad1c9c2b1";

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/customers/99")
            .insert_header(("trace-id", trace_id))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response
            .headers()
            .get("trace-id")
            .and_then(|value| value.to_str().ok()),
        Some(trace_id)
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("traceId"), Some(&json!(trace_id)));
    assert_eq!(
        body.get("message"),
        Some(&json!("Customer with id = 99 does not exist"))
    );
}
