//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the five operations of every resource plus the health probes
//! - **Schemas**: request bodies, views, page wrappers and the error payload
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) without coupling domain types to
//!   the utoipa framework
//!
//! The generated document is served by Swagger UI and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::brands::{BrandBody, BrandPage, BrandView};
use crate::inbound::http::customers::{CustomerBody, CustomerPage, CustomerView};
use crate::inbound::http::offers::{OfferBody, OfferPage, OfferView};
use crate::inbound::http::orders::{OrderCreateBody, OrderPage, OrderUpdateBody, OrderView};
use crate::inbound::http::products::{ProductBody, ProductPage, ProductView};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Subscriptions API",
        description = "CRUD interface for brands, products, offers, customers and orders."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::brands::list_brands,
        crate::inbound::http::brands::get_brand,
        crate::inbound::http::brands::create_brand,
        crate::inbound::http::brands::update_brand,
        crate::inbound::http::brands::delete_brand,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::offers::list_offers,
        crate::inbound::http::offers::get_offer,
        crate::inbound::http::offers::create_offer,
        crate::inbound::http::offers::update_offer,
        crate::inbound::http::offers::delete_offer,
        crate::inbound::http::customers::list_customers,
        crate::inbound::http::customers::get_customer,
        crate::inbound::http::customers::create_customer,
        crate::inbound::http::customers::update_customer,
        crate::inbound::http::customers::delete_customer,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::update_order,
        crate::inbound::http::orders::delete_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        BrandBody,
        BrandView,
        BrandPage,
        ProductBody,
        ProductView,
        ProductPage,
        OfferBody,
        OfferView,
        OfferPage,
        CustomerBody,
        CustomerView,
        CustomerPage,
        OrderCreateBody,
        OrderUpdateBody,
        OrderView,
        OrderPage,
    )),
    tags(
        (name = "brands", description = "Brands owning products"),
        (name = "products", description = "Products sold on a monthly or annual term"),
        (name = "offers", description = "Priced bundles of product terms"),
        (name = "customers", description = "Registered customers"),
        (name = "orders", description = "Customer subscriptions to offers"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
