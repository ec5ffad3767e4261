//! Offer storage.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::{PageRequest, PaginatedList};

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{
    Offer, OfferDraft, OfferFilter, Offers, Orders, Outcome, Products, RecordId, Resource, rules,
};
use crate::outbound::persistence::diesel_error_mapping::{
    contains_pattern, map_diesel_error, map_pool_error,
};
use crate::outbound::persistence::models::{NewOfferRow, OfferChanges, OfferRow};
use crate::outbound::persistence::schema::{offers, orders, products};

use super::{DieselCommerceRepository, page_window, row_exists, total_from_count};

fn filtered(filter: &OfferFilter) -> offers::BoxedQuery<'static, Pg> {
    let mut query = offers::table.into_boxed();
    if let Some(description) = &filter.description {
        query = query.filter(offers::description.ilike(contains_pattern(description)));
    }
    if let Some(product_id) = filter.product_id {
        query = query.filter(offers::product_id.eq(product_id));
    }
    if let Some(active) = filter.active_product {
        query = query.filter(
            offers::product_id.eq_any(
                products::table
                    .filter(products::is_active.eq(active))
                    .select(products::id),
            ),
        );
    }
    query
}

#[async_trait]
impl ResourceRepository<Offers> for DieselCommerceRepository {
    async fn list(
        &self,
        filter: &OfferFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Offer>, RepositoryError> {
        let (offset, limit) = page_window(request);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (count, rows) = conn
            .transaction(|conn| {
                async move {
                    let count = filtered(filter).count().get_result::<i64>(conn).await?;
                    let rows = filtered(filter)
                        .select(OfferRow::as_select())
                        .order(offers::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load::<OfferRow>(conn)
                        .await?;
                    Ok((count, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(Offer::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PaginatedList::from_page(
            items,
            request,
            total_from_count(count),
        ))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Offer>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = offers::table
            .find(id)
            .select(OfferRow::as_select())
            .first::<OfferRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Offer::try_from).transpose()
    }

    async fn create(&self, draft: &OfferDraft) -> Result<Outcome<Offer>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let product_id = draft.product_id();
                    if !row_exists!(conn, products::table.find(product_id)).await? {
                        return Ok(rules::missing(Products::SINGULAR, product_id));
                    }
                    let row = diesel::insert_into(offers::table)
                        .values(NewOfferRow {
                            product_id,
                            description: draft.description(),
                            price_cents: draft.price().cents(),
                            number_of_terms: draft.number_of_terms(),
                            date_created: now,
                            date_modified: now,
                        })
                        .returning(OfferRow::as_returning())
                        .get_result::<OfferRow>(conn)
                        .await?;
                    Ok(Outcome::success(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        outcome.try_map(Offer::try_from)
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &OfferDraft,
    ) -> Result<Outcome<Offer>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let product_id = changes.product_id();
                    if !row_exists!(conn, products::table.find(product_id)).await? {
                        return Ok(rules::missing(Products::SINGULAR, product_id));
                    }
                    if !row_exists!(conn, offers::table.find(id)).await? {
                        return Ok(rules::missing(Offers::SINGULAR, id));
                    }
                    let row = diesel::update(offers::table.find(id))
                        .set(OfferChanges {
                            product_id,
                            description: changes.description(),
                            price_cents: changes.price().cents(),
                            number_of_terms: changes.number_of_terms(),
                            date_modified: now,
                        })
                        .returning(OfferRow::as_returning())
                        .get_result::<OfferRow>(conn)
                        .await?;
                    Ok(Outcome::success(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        outcome.try_map(Offer::try_from)
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                if row_exists!(conn, orders::table.filter(orders::offer_id.eq(id))).await? {
                    return Ok(rules::delete_blocked(Offers::SINGULAR, id, Orders::SINGULAR));
                }
                diesel::delete(offers::table.find(id)).execute(conn).await?;
                Ok(Outcome::success(id))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
