//! Generic CRUD handler bodies shared by every resource.
//!
//! Each resource module supplies its wire types through [`HttpResource`] and
//! wraps these functions in thin, documented Actix handlers. Validation
//! always completes before the storage port is called.

use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, web};
use pagination::PaginatedList;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::ports::ResourceRepository;
use crate::domain::{Error, RecordId, Resource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{business_rule_error, page_request};

/// Prefix shared by every resource route.
pub const API_PREFIX: &str = "/api/v1";

/// HTTP projection of a [`Resource`].
pub trait HttpResource: Resource + Sized {
    /// Path segment under [`API_PREFIX`], e.g. `brands`.
    const COLLECTION: &'static str;

    /// Query string of the list endpoint, paging included.
    type ListQuery: DeserializeOwned;
    /// Body of `POST`.
    type CreateBody: DeserializeOwned;
    /// Body of `PUT`.
    type UpdateBody: DeserializeOwned;
    /// Client-facing representation of a record.
    type View: Serialize + From<Self::Record>;

    /// Raw `pageNumber` and `pageSize` values.
    fn paging(query: &Self::ListQuery) -> (Option<i64>, Option<i64>);

    /// Storage filter described by the query string.
    fn filter(query: Self::ListQuery) -> Self::Filter;

    /// Validate a create body.
    fn draft(body: Self::CreateBody) -> Result<Self::Draft, Error>;

    /// Validate an update body.
    fn changes(body: Self::UpdateBody) -> Result<Self::Changes, Error>;

    /// Storage port serving this resource.
    fn repository(state: &HttpState) -> &Arc<dyn ResourceRepository<Self>>;
}

/// `Location` of a stored record.
pub fn location_of<R: HttpResource>(id: RecordId) -> String {
    format!("{API_PREFIX}/{}/{id}", R::COLLECTION)
}

pub(crate) async fn list<R: HttpResource>(
    state: &HttpState,
    query: R::ListQuery,
) -> ApiResult<web::Json<PaginatedList<R::View>>> {
    let (page_number, page_size) = R::paging(&query);
    let request = page_request(page_number, page_size)?;
    let filter = R::filter(query);
    let page = R::repository(state).list(&filter, request).await?;
    Ok(web::Json(page.map(R::View::from)))
}

pub(crate) async fn get<R: HttpResource>(
    state: &HttpState,
    id: RecordId,
) -> ApiResult<web::Json<R::View>> {
    let record = R::repository(state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("{} with id = {id} does not exist", R::SINGULAR)))?;
    Ok(web::Json(R::View::from(record)))
}

pub(crate) async fn create<R: HttpResource>(
    state: &HttpState,
    body: R::CreateBody,
) -> ApiResult<HttpResponse> {
    let draft = R::draft(body)?;
    let record = R::repository(state)
        .create(&draft)
        .await?
        .into_result()
        .map_err(business_rule_error)?;
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, location_of::<R>(R::id_of(&record))))
        .json(R::View::from(record)))
}

pub(crate) async fn update<R: HttpResource>(
    state: &HttpState,
    id: RecordId,
    body: R::UpdateBody,
) -> ApiResult<web::Json<R::View>> {
    let changes = R::changes(body)?;
    let record = R::repository(state)
        .update(id, &changes)
        .await?
        .into_result()
        .map_err(business_rule_error)?;
    Ok(web::Json(R::View::from(record)))
}

pub(crate) async fn delete<R: HttpResource>(
    state: &HttpState,
    id: RecordId,
) -> ApiResult<web::Json<RecordId>> {
    let deleted = R::repository(state)
        .delete(id)
        .await?
        .into_result()
        .map_err(business_rule_error)?;
    Ok(web::Json(deleted))
}
