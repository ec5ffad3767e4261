//! Order endpoints.
//!
//! Orders are never removed: `DELETE` marks the order cancelled and reports
//! success even for an unknown identity.
//!
//! ```text
//! GET    /api/v1/orders?offerId=1&customerId=2
//! GET    /api/v1/orders/{id}
//! POST   /api/v1/orders {"offerId":1,"customerId":2,"startDate":"2024-03-01"}
//! PUT    /api/v1/orders/{id} {"paid":true,"cancelled":false,"reason":null}
//! DELETE /api/v1/orders/{id}
//! ```

use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PaginatedList;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ResourceRepository;
use crate::domain::{Error, Order, OrderDraft, OrderFilter, OrderUpdate, Orders, RecordId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{self, HttpResource};
use crate::inbound::http::schemas::{ErrorSchema, page_schema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, draft_error, parse_optional_timestamp};

const START_DATE: FieldName = FieldName::new("startDate");

/// Query string of `GET /api/v1/orders`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// 1-based page number; defaults to 1.
    pub page_number: Option<i64>,
    /// Items per page; defaults to 100.
    pub page_size: Option<i64>,
    /// Only orders for this offer.
    pub offer_id: Option<RecordId>,
    /// Only orders placed by this customer.
    pub customer_id: Option<RecordId>,
}

/// Body of `POST /api/v1/orders`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateBody {
    pub offer_id: RecordId,
    pub customer_id: RecordId,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to now.
    #[serde(default)]
    #[schema(example = "2024-03-01")]
    pub start_date: Option<String>,
}

/// Body of `PUT /api/v1/orders/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdateBody {
    pub paid: bool,
    pub cancelled: bool,
    #[serde(default)]
    #[schema(example = "Moved abroad")]
    pub reason: Option<String>,
}

/// Client-facing order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: RecordId,
    pub offer_id: RecordId,
    pub customer_id: RecordId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub paid: bool,
    pub cancelled: bool,
    pub reason: Option<String>,
    pub date_modified: DateTime<Utc>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            offer_id: order.offer_id,
            customer_id: order.customer_id,
            start_date: order.start_date,
            end_date: order.end_date,
            paid: order.paid,
            cancelled: order.cancelled,
            reason: order.reason,
            date_modified: order.date_modified,
        }
    }
}

page_schema!(OrderPage, OrderView);

impl HttpResource for Orders {
    const COLLECTION: &'static str = "orders";

    type ListQuery = OrderListQuery;
    type CreateBody = OrderCreateBody;
    type UpdateBody = OrderUpdateBody;
    type View = OrderView;

    fn paging(query: &OrderListQuery) -> (Option<i64>, Option<i64>) {
        (query.page_number, query.page_size)
    }

    fn filter(query: OrderListQuery) -> OrderFilter {
        OrderFilter {
            offer_id: query.offer_id,
            customer_id: query.customer_id,
        }
    }

    fn draft(body: OrderCreateBody) -> Result<OrderDraft, Error> {
        let start_date = parse_optional_timestamp(body.start_date.as_deref(), START_DATE)?;
        Ok(OrderDraft::new(body.offer_id, body.customer_id, start_date))
    }

    fn changes(body: OrderUpdateBody) -> Result<OrderUpdate, Error> {
        OrderUpdate::try_new(body.paid, body.cancelled, body.reason)
            .map_err(|err| draft_error(&err))
    }

    fn repository(state: &HttpState) -> &Arc<dyn ResourceRepository<Self>> {
        &state.orders
    }
}

/// List orders, optionally filtered by offer and customer.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "One page of orders", body = OrderPage),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    query: web::Query<OrderListQuery>,
) -> ApiResult<web::Json<PaginatedList<OrderView>>> {
    resource::list::<Orders>(&state, query.into_inner()).await
}

/// Fetch one order.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = i32, Path, description = "Order identity")),
    responses(
        (status = 200, description = "The order", body = OrderView),
        (status = 404, description = "Unknown order", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<OrderView>> {
    resource::get::<Orders>(&state, id.into_inner()).await
}

/// Place an order; the end date follows from the offer's terms.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = OrderCreateBody,
    responses(
        (status = 201, description = "Order placed", body = OrderView,
            headers(("Location" = String, description = "URL of the new order"))),
        (status = 400, description = "Unknown customer or offer, inactive product or bad start date", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    body: web::Json<OrderCreateBody>,
) -> ApiResult<HttpResponse> {
    resource::create::<Orders>(&state, body.into_inner()).await
}

/// Change an order's payment and cancellation status.
#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}",
    params(("id" = i32, Path, description = "Order identity")),
    request_body = OrderUpdateBody,
    responses(
        (status = 200, description = "Order updated", body = OrderView),
        (status = 400, description = "Invalid status or unknown order", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "updateOrder"
)]
#[put("/orders/{id}")]
pub async fn update_order(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
    body: web::Json<OrderUpdateBody>,
) -> ApiResult<web::Json<OrderView>> {
    resource::update::<Orders>(&state, id.into_inner(), body.into_inner()).await
}

/// Cancel an order.
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    params(("id" = i32, Path, description = "Order identity")),
    responses(
        (status = 200, description = "Identity of the cancelled order", body = i32)
    ),
    tags = ["orders"],
    operation_id = "deleteOrder"
)]
#[delete("/orders/{id}")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<RecordId>> {
    resource::delete::<Orders>(&state, id.into_inner()).await
}

/// Register the order routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_orders)
        .service(get_order)
        .service(create_order)
        .service(update_order)
        .service(delete_order);
}
