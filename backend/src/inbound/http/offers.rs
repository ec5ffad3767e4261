//! Offer endpoints.
//!
//! ```text
//! GET    /api/v1/offers?description=intro&productId=1&activeProduct=true
//! GET    /api/v1/offers/{id}
//! POST   /api/v1/offers {"productId":1,"description":"Intro","price":9.99,"numberOfTerms":12}
//! PUT    /api/v1/offers/{id}
//! DELETE /api/v1/offers/{id}
//! ```

use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PaginatedList;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ResourceRepository;
use crate::domain::{Error, Offer, OfferDraft, OfferFilter, Offers, RecordId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{self, HttpResource};
use crate::inbound::http::schemas::{ErrorSchema, page_schema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::draft_error;

/// Query string of `GET /api/v1/offers`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OfferListQuery {
    /// 1-based page number; defaults to 1.
    pub page_number: Option<i64>,
    /// Items per page; defaults to 100.
    pub page_size: Option<i64>,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    /// Only offers of this product.
    pub product_id: Option<RecordId>,
    /// Only offers whose product is active (`true`) or inactive (`false`).
    pub active_product: Option<bool>,
}

/// Body of offer create and update requests.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferBody {
    pub product_id: RecordId,
    #[serde(default)]
    #[schema(example = "Introductory annual bundle")]
    pub description: Option<String>,
    /// Price per term, at most two decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    #[schema(example = 12)]
    pub number_of_terms: i32,
}

/// Client-facing offer.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferView {
    pub offer_id: RecordId,
    pub product_id: RecordId,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub number_of_terms: i32,
    pub date_modified: DateTime<Utc>,
}

impl From<Offer> for OfferView {
    fn from(offer: Offer) -> Self {
        Self {
            offer_id: offer.id,
            product_id: offer.product_id,
            description: offer.description,
            price: offer.price.as_decimal(),
            number_of_terms: offer.number_of_terms,
            date_modified: offer.date_modified,
        }
    }
}

page_schema!(OfferPage, OfferView);

impl HttpResource for Offers {
    const COLLECTION: &'static str = "offers";

    type ListQuery = OfferListQuery;
    type CreateBody = OfferBody;
    type UpdateBody = OfferBody;
    type View = OfferView;

    fn paging(query: &OfferListQuery) -> (Option<i64>, Option<i64>) {
        (query.page_number, query.page_size)
    }

    fn filter(query: OfferListQuery) -> OfferFilter {
        OfferFilter {
            description: query.description,
            product_id: query.product_id,
            active_product: query.active_product,
        }
    }

    fn draft(body: OfferBody) -> Result<OfferDraft, Error> {
        OfferDraft::try_new(
            body.product_id,
            body.description,
            body.price,
            body.number_of_terms,
        )
        .map_err(|err| draft_error(&err))
    }

    fn changes(body: OfferBody) -> Result<OfferDraft, Error> {
        Self::draft(body)
    }

    fn repository(state: &HttpState) -> &Arc<dyn ResourceRepository<Self>> {
        &state.offers
    }
}

/// List offers, optionally filtered by description, product and product activity.
#[utoipa::path(
    get,
    path = "/api/v1/offers",
    params(OfferListQuery),
    responses(
        (status = 200, description = "One page of offers", body = OfferPage),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["offers"],
    operation_id = "listOffers"
)]
#[get("/offers")]
pub async fn list_offers(
    state: web::Data<HttpState>,
    query: web::Query<OfferListQuery>,
) -> ApiResult<web::Json<PaginatedList<OfferView>>> {
    resource::list::<Offers>(&state, query.into_inner()).await
}

/// Fetch one offer.
#[utoipa::path(
    get,
    path = "/api/v1/offers/{id}",
    params(("id" = i32, Path, description = "Offer identity")),
    responses(
        (status = 200, description = "The offer", body = OfferView),
        (status = 404, description = "Unknown offer", body = ErrorSchema)
    ),
    tags = ["offers"],
    operation_id = "getOffer"
)]
#[get("/offers/{id}")]
pub async fn get_offer(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<OfferView>> {
    resource::get::<Offers>(&state, id.into_inner()).await
}

/// Create an offer for an existing product.
#[utoipa::path(
    post,
    path = "/api/v1/offers",
    request_body = OfferBody,
    responses(
        (status = 201, description = "Offer created", body = OfferView,
            headers(("Location" = String, description = "URL of the new offer"))),
        (status = 400, description = "Invalid offer or unknown product", body = ErrorSchema)
    ),
    tags = ["offers"],
    operation_id = "createOffer"
)]
#[post("/offers")]
pub async fn create_offer(
    state: web::Data<HttpState>,
    body: web::Json<OfferBody>,
) -> ApiResult<HttpResponse> {
    resource::create::<Offers>(&state, body.into_inner()).await
}

/// Replace an offer's fields.
#[utoipa::path(
    put,
    path = "/api/v1/offers/{id}",
    params(("id" = i32, Path, description = "Offer identity")),
    request_body = OfferBody,
    responses(
        (status = 200, description = "Offer updated", body = OfferView),
        (status = 400, description = "Invalid offer, unknown offer or unknown product", body = ErrorSchema)
    ),
    tags = ["offers"],
    operation_id = "updateOffer"
)]
#[put("/offers/{id}")]
pub async fn update_offer(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
    body: web::Json<OfferBody>,
) -> ApiResult<web::Json<OfferView>> {
    resource::update::<Offers>(&state, id.into_inner(), body.into_inner()).await
}

/// Delete an offer that no order references.
#[utoipa::path(
    delete,
    path = "/api/v1/offers/{id}",
    params(("id" = i32, Path, description = "Offer identity")),
    responses(
        (status = 200, description = "Identity of the deleted offer", body = i32),
        (status = 400, description = "Offer still referenced by an order", body = ErrorSchema)
    ),
    tags = ["offers"],
    operation_id = "deleteOffer"
)]
#[delete("/offers/{id}")]
pub async fn delete_offer(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<RecordId>> {
    resource::delete::<Offers>(&state, id.into_inner()).await
}

/// Register the offer routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_offers)
        .service(get_offer)
        .service(create_offer)
        .service(update_offer)
        .service(delete_offer);
}
