//! Brand endpoints.
//!
//! ```text
//! GET    /api/v1/brands?name=acme&pageNumber=1&pageSize=20
//! GET    /api/v1/brands/{id}
//! POST   /api/v1/brands {"name":"Acme"}
//! PUT    /api/v1/brands/{id} {"name":"Acme Fitness"}
//! DELETE /api/v1/brands/{id}
//! ```

use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PaginatedList;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ResourceRepository;
use crate::domain::{Brand, BrandDraft, BrandFilter, Brands, Error, RecordId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{self, HttpResource};
use crate::inbound::http::schemas::{ErrorSchema, page_schema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::draft_error;

/// Query string of `GET /api/v1/brands`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BrandListQuery {
    /// 1-based page number; defaults to 1.
    pub page_number: Option<i64>,
    /// Items per page; defaults to 100.
    pub page_size: Option<i64>,
    /// Case-insensitive substring of the brand name.
    pub name: Option<String>,
}

/// Body of brand create and update requests.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandBody {
    #[schema(example = "Acme")]
    pub name: String,
}

/// Client-facing brand.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandView {
    pub brand_id: RecordId,
    pub name: String,
    pub date_modified: DateTime<Utc>,
}

impl From<Brand> for BrandView {
    fn from(brand: Brand) -> Self {
        Self {
            brand_id: brand.id,
            name: brand.name,
            date_modified: brand.date_modified,
        }
    }
}

page_schema!(BrandPage, BrandView);

impl HttpResource for Brands {
    const COLLECTION: &'static str = "brands";

    type ListQuery = BrandListQuery;
    type CreateBody = BrandBody;
    type UpdateBody = BrandBody;
    type View = BrandView;

    fn paging(query: &BrandListQuery) -> (Option<i64>, Option<i64>) {
        (query.page_number, query.page_size)
    }

    fn filter(query: BrandListQuery) -> BrandFilter {
        BrandFilter { name: query.name }
    }

    fn draft(body: BrandBody) -> Result<BrandDraft, Error> {
        BrandDraft::try_new(body.name).map_err(|err| draft_error(&err))
    }

    fn changes(body: BrandBody) -> Result<BrandDraft, Error> {
        Self::draft(body)
    }

    fn repository(state: &HttpState) -> &Arc<dyn ResourceRepository<Self>> {
        &state.brands
    }
}

/// List brands, optionally filtered by name.
#[utoipa::path(
    get,
    path = "/api/v1/brands",
    params(BrandListQuery),
    responses(
        (status = 200, description = "One page of brands", body = BrandPage),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "listBrands"
)]
#[get("/brands")]
pub async fn list_brands(
    state: web::Data<HttpState>,
    query: web::Query<BrandListQuery>,
) -> ApiResult<web::Json<PaginatedList<BrandView>>> {
    resource::list::<Brands>(&state, query.into_inner()).await
}

/// Fetch one brand.
#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}",
    params(("id" = i32, Path, description = "Brand identity")),
    responses(
        (status = 200, description = "The brand", body = BrandView),
        (status = 404, description = "Unknown brand", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "getBrand"
)]
#[get("/brands/{id}")]
pub async fn get_brand(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<BrandView>> {
    resource::get::<Brands>(&state, id.into_inner()).await
}

/// Create a brand.
#[utoipa::path(
    post,
    path = "/api/v1/brands",
    request_body = BrandBody,
    responses(
        (status = 201, description = "Brand created", body = BrandView,
            headers(("Location" = String, description = "URL of the new brand"))),
        (status = 400, description = "Invalid brand", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "createBrand"
)]
#[post("/brands")]
pub async fn create_brand(
    state: web::Data<HttpState>,
    body: web::Json<BrandBody>,
) -> ApiResult<HttpResponse> {
    resource::create::<Brands>(&state, body.into_inner()).await
}

/// Rename a brand.
#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}",
    params(("id" = i32, Path, description = "Brand identity")),
    request_body = BrandBody,
    responses(
        (status = 200, description = "Brand updated", body = BrandView),
        (status = 400, description = "Invalid brand or unknown identity", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "updateBrand"
)]
#[put("/brands/{id}")]
pub async fn update_brand(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
    body: web::Json<BrandBody>,
) -> ApiResult<web::Json<BrandView>> {
    resource::update::<Brands>(&state, id.into_inner(), body.into_inner()).await
}

/// Delete a brand that no product references.
#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    params(("id" = i32, Path, description = "Brand identity")),
    responses(
        (status = 200, description = "Identity of the deleted brand", body = i32),
        (status = 400, description = "Brand still referenced by a product", body = ErrorSchema)
    ),
    tags = ["brands"],
    operation_id = "deleteBrand"
)]
#[delete("/brands/{id}")]
pub async fn delete_brand(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<RecordId>> {
    resource::delete::<Brands>(&state, id.into_inner()).await
}

/// Register the brand routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_brands)
        .service(get_brand)
        .service(create_brand)
        .service(update_brand)
        .service(delete_brand);
}
