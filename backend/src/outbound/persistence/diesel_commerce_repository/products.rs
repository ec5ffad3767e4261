//! Product storage.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::{PageRequest, PaginatedList};

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{
    Brands, Offers, Outcome, Product, ProductDraft, ProductFilter, Products, RecordId, Resource,
    rules,
};
use crate::outbound::persistence::diesel_error_mapping::{
    contains_pattern, map_diesel_error, map_pool_error,
};
use crate::outbound::persistence::models::{NewProductRow, ProductChanges, ProductRow};
use crate::outbound::persistence::schema::{brands, offers, products};

use super::{DieselCommerceRepository, page_window, row_exists, total_from_count};

fn filtered(filter: &ProductFilter) -> products::BoxedQuery<'static, Pg> {
    let mut query = products::table.into_boxed();
    if let Some(name) = &filter.name {
        query = query.filter(products::name.ilike(contains_pattern(name)));
    }
    if let Some(brand_name) = &filter.brand_name {
        query = query.filter(
            products::brand_id.eq_any(
                brands::table
                    .filter(brands::name.ilike(contains_pattern(brand_name)))
                    .select(brands::id),
            ),
        );
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(products::is_active.eq(is_active));
    }
    query
}

#[async_trait]
impl ResourceRepository<Products> for DieselCommerceRepository {
    async fn list(
        &self,
        filter: &ProductFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Product>, RepositoryError> {
        let (offset, limit) = page_window(request);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (count, rows) = conn
            .transaction(|conn| {
                async move {
                    let count = filtered(filter).count().get_result::<i64>(conn).await?;
                    let rows = filtered(filter)
                        .select(ProductRow::as_select())
                        .order(products::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load::<ProductRow>(conn)
                        .await?;
                    Ok((count, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PaginatedList::from_page(
            items,
            request,
            total_from_count(count),
        ))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Product::try_from).transpose()
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Outcome<Product>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let brand_id = draft.brand_id();
                    if !row_exists!(conn, brands::table.find(brand_id)).await? {
                        return Ok(rules::missing(Brands::SINGULAR, brand_id));
                    }
                    let row = diesel::insert_into(products::table)
                        .values(NewProductRow {
                            name: draft.name(),
                            is_active: draft.is_active(),
                            term: draft.term().as_str(),
                            brand_id,
                            date_created: now,
                            date_modified: now,
                        })
                        .returning(ProductRow::as_returning())
                        .get_result::<ProductRow>(conn)
                        .await?;
                    Ok(Outcome::success(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        outcome.try_map(Product::try_from)
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &ProductDraft,
    ) -> Result<Outcome<Product>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let brand_id = changes.brand_id();
                    if !row_exists!(conn, brands::table.find(brand_id)).await? {
                        return Ok(rules::missing(Brands::SINGULAR, brand_id));
                    }
                    if !row_exists!(conn, products::table.find(id)).await? {
                        return Ok(rules::missing(Products::SINGULAR, id));
                    }
                    let row = diesel::update(products::table.find(id))
                        .set(ProductChanges {
                            name: changes.name(),
                            is_active: changes.is_active(),
                            term: changes.term().as_str(),
                            brand_id,
                            date_modified: now,
                        })
                        .returning(ProductRow::as_returning())
                        .get_result::<ProductRow>(conn)
                        .await?;
                    Ok(Outcome::success(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        outcome.try_map(Product::try_from)
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                if row_exists!(conn, offers::table.filter(offers::product_id.eq(id))).await? {
                    return Ok(rules::delete_blocked(
                        Products::SINGULAR,
                        id,
                        Offers::SINGULAR,
                    ));
                }
                diesel::delete(products::table.find(id)).execute(conn).await?;
                Ok(Outcome::success(id))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
