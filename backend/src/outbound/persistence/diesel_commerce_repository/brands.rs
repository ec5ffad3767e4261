//! Brand storage.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::{PageRequest, PaginatedList};

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{
    Brand, BrandDraft, BrandFilter, Brands, Outcome, Products, RecordId, Resource, rules,
};
use crate::outbound::persistence::diesel_error_mapping::{
    contains_pattern, map_diesel_error, map_pool_error,
};
use crate::outbound::persistence::models::{BrandChanges, BrandRow, NewBrandRow};
use crate::outbound::persistence::schema::{brands, products};

use super::{DieselCommerceRepository, page_window, row_exists, total_from_count};

fn filtered(filter: &BrandFilter) -> brands::BoxedQuery<'static, Pg> {
    let mut query = brands::table.into_boxed();
    if let Some(name) = &filter.name {
        query = query.filter(brands::name.ilike(contains_pattern(name)));
    }
    query
}

#[async_trait]
impl ResourceRepository<Brands> for DieselCommerceRepository {
    async fn list(
        &self,
        filter: &BrandFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Brand>, RepositoryError> {
        let (offset, limit) = page_window(request);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (count, rows) = conn
            .transaction(|conn| {
                async move {
                    let count = filtered(filter).count().get_result::<i64>(conn).await?;
                    let rows = filtered(filter)
                        .select(BrandRow::as_select())
                        .order(brands::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load::<BrandRow>(conn)
                        .await?;
                    Ok((count, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(Brand::from).collect();
        Ok(PaginatedList::from_page(
            items,
            request,
            total_from_count(count),
        ))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Brand>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = brands::table
            .find(id)
            .select(BrandRow::as_select())
            .first::<BrandRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Brand::from))
    }

    async fn create(&self, draft: &BrandDraft) -> Result<Outcome<Brand>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(brands::table)
            .values(NewBrandRow {
                name: draft.name(),
                date_created: now,
                date_modified: now,
            })
            .returning(BrandRow::as_returning())
            .get_result::<BrandRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Outcome::success(Brand::from(row)))
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &BrandDraft,
    ) -> Result<Outcome<Brand>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(brands::table.find(id))
            .set(BrandChanges {
                name: changes.name(),
                date_modified: now,
            })
            .returning(BrandRow::as_returning())
            .get_result::<BrandRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(match row {
            Some(row) => Outcome::success(Brand::from(row)),
            None => rules::missing(Brands::SINGULAR, id),
        })
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                if row_exists!(conn, products::table.filter(products::brand_id.eq(id))).await? {
                    return Ok(rules::delete_blocked(
                        Brands::SINGULAR,
                        id,
                        Products::SINGULAR,
                    ));
                }
                diesel::delete(brands::table.find(id)).execute(conn).await?;
                Ok(Outcome::success(id))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
