//! Customer endpoints.
//!
//! ```text
//! GET    /api/v1/customers?name=ada&email=example.com&offerId=3
//! GET    /api/v1/customers/{id}
//! POST   /api/v1/customers {"emailAddress":"ada@example.com","firstName":"Ada","lastName":"Lovelace"}
//! PUT    /api/v1/customers/{id}
//! DELETE /api/v1/customers/{id}
//! ```

use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PaginatedList;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ResourceRepository;
use crate::domain::{Customer, CustomerDraft, CustomerFilter, Customers, Error, RecordId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{self, HttpResource};
use crate::inbound::http::schemas::{ErrorSchema, page_schema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::draft_error;

/// Query string of `GET /api/v1/customers`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerListQuery {
    /// 1-based page number; defaults to 1.
    pub page_number: Option<i64>,
    /// Items per page; defaults to 100.
    pub page_size: Option<i64>,
    /// Case-insensitive substring of the first or last name.
    pub name: Option<String>,
    /// Case-insensitive substring of the e-mail address.
    pub email: Option<String>,
    /// Only customers with an order for this offer.
    pub offer_id: Option<RecordId>,
}

/// Body of customer create and update requests.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBody {
    #[schema(example = "ada@example.com")]
    pub email_address: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
}

/// Client-facing customer.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub customer_id: RecordId,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub date_modified: DateTime<Utc>,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            customer_id: customer.id,
            email_address: customer.email_address,
            first_name: customer.first_name,
            last_name: customer.last_name,
            date_modified: customer.date_modified,
        }
    }
}

page_schema!(CustomerPage, CustomerView);

impl HttpResource for Customers {
    const COLLECTION: &'static str = "customers";

    type ListQuery = CustomerListQuery;
    type CreateBody = CustomerBody;
    type UpdateBody = CustomerBody;
    type View = CustomerView;

    fn paging(query: &CustomerListQuery) -> (Option<i64>, Option<i64>) {
        (query.page_number, query.page_size)
    }

    fn filter(query: CustomerListQuery) -> CustomerFilter {
        CustomerFilter {
            name: query.name,
            email: query.email,
            offer_id: query.offer_id,
        }
    }

    fn draft(body: CustomerBody) -> Result<CustomerDraft, Error> {
        CustomerDraft::try_new(&body.email_address, body.first_name, body.last_name)
            .map_err(|err| draft_error(&err))
    }

    fn changes(body: CustomerBody) -> Result<CustomerDraft, Error> {
        Self::draft(body)
    }

    fn repository(state: &HttpState) -> &Arc<dyn ResourceRepository<Self>> {
        &state.customers
    }
}

/// List customers, optionally filtered by name, e-mail and subscribed offer.
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    params(CustomerListQuery),
    responses(
        (status = 200, description = "One page of customers", body = CustomerPage),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "listCustomers"
)]
#[get("/customers")]
pub async fn list_customers(
    state: web::Data<HttpState>,
    query: web::Query<CustomerListQuery>,
) -> ApiResult<web::Json<PaginatedList<CustomerView>>> {
    resource::list::<Customers>(&state, query.into_inner()).await
}

/// Fetch one customer.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    params(("id" = i32, Path, description = "Customer identity")),
    responses(
        (status = 200, description = "The customer", body = CustomerView),
        (status = 404, description = "Unknown customer", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "getCustomer"
)]
#[get("/customers/{id}")]
pub async fn get_customer(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<CustomerView>> {
    resource::get::<Customers>(&state, id.into_inner()).await
}

/// Register a customer with an unused e-mail address.
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    request_body = CustomerBody,
    responses(
        (status = 201, description = "Customer created", body = CustomerView,
            headers(("Location" = String, description = "URL of the new customer"))),
        (status = 400, description = "Invalid customer or e-mail already registered", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "createCustomer"
)]
#[post("/customers")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    body: web::Json<CustomerBody>,
) -> ApiResult<HttpResponse> {
    resource::create::<Customers>(&state, body.into_inner()).await
}

/// Replace a customer's fields.
#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    params(("id" = i32, Path, description = "Customer identity")),
    request_body = CustomerBody,
    responses(
        (status = 200, description = "Customer updated", body = CustomerView),
        (status = 400, description = "Invalid customer, unknown customer or e-mail already registered", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "updateCustomer"
)]
#[put("/customers/{id}")]
pub async fn update_customer(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
    body: web::Json<CustomerBody>,
) -> ApiResult<web::Json<CustomerView>> {
    resource::update::<Customers>(&state, id.into_inner(), body.into_inner()).await
}

/// Delete a customer that no order references.
#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    params(("id" = i32, Path, description = "Customer identity")),
    responses(
        (status = 200, description = "Identity of the deleted customer", body = i32),
        (status = 400, description = "Customer still referenced by an order", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "deleteCustomer"
)]
#[delete("/customers/{id}")]
pub async fn delete_customer(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<RecordId>> {
    resource::delete::<Customers>(&state, id.into_inner()).await
}

/// Register the customer routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_customers)
        .service(get_customer)
        .service(create_customer)
        .service(update_customer)
        .service(delete_customer);
}
