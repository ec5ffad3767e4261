//! Product endpoints.
//!
//! ```text
//! GET    /api/v1/products?name=gym&brand=acme&isActive=true
//! GET    /api/v1/products/{id}
//! POST   /api/v1/products {"name":"Gym","isActive":true,"term":"monthly","brandId":1}
//! PUT    /api/v1/products/{id}
//! DELETE /api/v1/products/{id}
//! ```

use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::PaginatedList;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ResourceRepository;
use crate::domain::{Error, Product, ProductDraft, ProductFilter, Products, RecordId, Term};
use crate::inbound::http::ApiResult;
use crate::inbound::http::resource::{self, HttpResource};
use crate::inbound::http::schemas::{ErrorSchema, page_schema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::draft_error;

/// Query string of `GET /api/v1/products`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// 1-based page number; defaults to 1.
    pub page_number: Option<i64>,
    /// Items per page; defaults to 100.
    pub page_size: Option<i64>,
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    /// Case-insensitive substring of the owning brand's name.
    pub brand: Option<String>,
    /// Only active (`true`) or inactive (`false`) products.
    pub is_active: Option<bool>,
}

/// Body of product create and update requests.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    #[schema(example = "Gym membership")]
    pub name: String,
    pub is_active: bool,
    /// `monthly` or `annually`.
    #[schema(example = "monthly")]
    pub term: String,
    pub brand_id: RecordId,
}

/// Client-facing product.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub product_id: RecordId,
    pub name: String,
    pub is_active: bool,
    #[schema(value_type = String, example = "annually")]
    pub term: Term,
    pub brand_id: RecordId,
    pub date_modified: DateTime<Utc>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            is_active: product.is_active,
            term: product.term,
            brand_id: product.brand_id,
            date_modified: product.date_modified,
        }
    }
}

page_schema!(ProductPage, ProductView);

impl HttpResource for Products {
    const COLLECTION: &'static str = "products";

    type ListQuery = ProductListQuery;
    type CreateBody = ProductBody;
    type UpdateBody = ProductBody;
    type View = ProductView;

    fn paging(query: &ProductListQuery) -> (Option<i64>, Option<i64>) {
        (query.page_number, query.page_size)
    }

    fn filter(query: ProductListQuery) -> ProductFilter {
        ProductFilter {
            name: query.name,
            brand_name: query.brand,
            is_active: query.is_active,
        }
    }

    fn draft(body: ProductBody) -> Result<ProductDraft, Error> {
        ProductDraft::try_new(body.name, body.is_active, &body.term, body.brand_id)
            .map_err(|err| draft_error(&err))
    }

    fn changes(body: ProductBody) -> Result<ProductDraft, Error> {
        Self::draft(body)
    }

    fn repository(state: &HttpState) -> &Arc<dyn ResourceRepository<Self>> {
        &state.products
    }
}

/// List products, optionally filtered by name, brand name and activity.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ProductListQuery>,
) -> ApiResult<web::Json<PaginatedList<ProductView>>> {
    resource::list::<Products>(&state, query.into_inner()).await
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product identity")),
    responses(
        (status = 200, description = "The product", body = ProductView),
        (status = 404, description = "Unknown product", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<ProductView>> {
    resource::get::<Products>(&state, id.into_inner()).await
}

/// Create a product under an existing brand.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductBody,
    responses(
        (status = 201, description = "Product created", body = ProductView,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, description = "Invalid product or unknown brand", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    body: web::Json<ProductBody>,
) -> ApiResult<HttpResponse> {
    resource::create::<Products>(&state, body.into_inner()).await
}

/// Replace a product's fields.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product identity")),
    request_body = ProductBody,
    responses(
        (status = 200, description = "Product updated", body = ProductView),
        (status = 400, description = "Invalid product, unknown product or unknown brand", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
    body: web::Json<ProductBody>,
) -> ApiResult<web::Json<ProductView>> {
    resource::update::<Products>(&state, id.into_inner(), body.into_inner()).await
}

/// Delete a product that no offer references.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product identity")),
    responses(
        (status = 200, description = "Identity of the deleted product", body = i32),
        (status = 400, description = "Product still referenced by an offer", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    id: web::Path<RecordId>,
) -> ApiResult<web::Json<RecordId>> {
    resource::delete::<Products>(&state, id.into_inner()).await
}

/// Register the product routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_products)
        .service(get_product)
        .service(create_product)
        .service(update_product)
        .service(delete_product);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{memory_state, str_field, test_app};

    async fn seeded_app() -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        let app = actix_test::init_service(test_app(memory_state())).await;
        for name in ["Acme", "Globex"] {
            let request = actix_test::TestRequest::post()
                .uri("/api/v1/brands")
                .set_json(json!({ "name": name }))
                .to_request();
            actix_test::call_service(&app, request).await;
        }
        for (name, active, brand) in [("Gym", true, 1), ("Pool", false, 1), ("Spa", true, 2)] {
            let request = actix_test::TestRequest::post()
                .uri("/api/v1/products")
                .set_json(json!({
                    "name": name,
                    "isActive": active,
                    "term": "monthly",
                    "brandId": brand,
                }))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }
        app
    }

    #[actix_web::test]
    async fn product_view_uses_wire_names() {
        let app = seeded_app().await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/products/3")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body.get("productId"), Some(&json!(3)));
        assert_eq!(body.get("isActive"), Some(&json!(true)));
        assert_eq!(str_field(&body, "term"), Some("monthly"));
        assert_eq!(body.get("brandId"), Some(&json!(2)));
    }

    #[rstest]
    #[case("/api/v1/products?brand=acme", 2)]
    #[case("/api/v1/products?brand=acme&isActive=true", 1)]
    #[case("/api/v1/products?isActive=false", 1)]
    #[case("/api/v1/products?name=S", 1)]
    #[case("/api/v1/products?brand=initech", 0)]
    #[actix_web::test]
    async fn list_applies_filters(#[case] uri: &str, #[case] expected: u64) {
        let app = seeded_app().await;

        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body.get("totalCount"), Some(&json!(expected)));
    }

    #[actix_web::test]
    async fn unknown_term_is_rejected() {
        let app = seeded_app().await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/products")
            .set_json(json!({ "name": "Gym", "isActive": true, "term": "weekly", "brandId": 1 }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            str_field(&body, "message"),
            Some("Term allowed values annually or monthly")
        );
    }

    #[actix_web::test]
    async fn unknown_brand_is_refused() {
        let app = seeded_app().await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/products")
            .set_json(json!({ "name": "Gym", "isActive": true, "term": "annually", "brandId": 2147483647 }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            str_field(&body, "message"),
            Some("Brand with id = 2147483647 does not exist")
        );
    }

    #[actix_web::test]
    async fn brand_with_products_cannot_be_deleted() {
        let app = seeded_app().await;

        let request = actix_test::TestRequest::delete()
            .uri("/api/v1/brands/1")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            str_field(&body, "message"),
            Some("Brand with id = 1 can't be deleted (referenced by some Product)")
        );
    }
}
