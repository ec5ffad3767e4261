//! Order storage.
//!
//! Deleting an order cancels it instead of removing the row.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::{PageRequest, PaginatedList};

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{
    Customers, Offers, Order, OrderDraft, OrderFilter, OrderUpdate, Orders, Outcome, RecordId,
    Resource, Term, rules, subscription_end,
};
use crate::outbound::persistence::diesel_error_mapping::{map_diesel_error, map_pool_error};
use crate::outbound::persistence::models::{
    NewOrderRow, OfferRow, OrderChanges, OrderRow, ProductRow,
};
use crate::outbound::persistence::schema::{customers, offers, orders, products};

use super::{DieselCommerceRepository, page_window, row_exists, total_from_count};

fn filtered(filter: &OrderFilter) -> orders::BoxedQuery<'static, Pg> {
    let mut query = orders::table.into_boxed();
    if let Some(offer_id) = filter.offer_id {
        query = query.filter(orders::offer_id.eq(offer_id));
    }
    if let Some(customer_id) = filter.customer_id {
        query = query.filter(orders::customer_id.eq(customer_id));
    }
    query
}

#[async_trait]
impl ResourceRepository<Orders> for DieselCommerceRepository {
    async fn list(
        &self,
        filter: &OrderFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Order>, RepositoryError> {
        let (offset, limit) = page_window(request);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (count, rows) = conn
            .transaction(|conn| {
                async move {
                    let count = filtered(filter).count().get_result::<i64>(conn).await?;
                    let rows = filtered(filter)
                        .select(OrderRow::as_select())
                        .order(orders::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load::<OrderRow>(conn)
                        .await?;
                    Ok((count, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(Order::from).collect();
        Ok(PaginatedList::from_page(
            items,
            request,
            total_from_count(count),
        ))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Order::from))
    }

    async fn create(&self, draft: &OrderDraft) -> Result<Outcome<Order>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let customer_id = draft.customer_id();
                    if !row_exists!(conn, customers::table.find(customer_id)).await? {
                        return Ok(rules::missing(Customers::SINGULAR, customer_id));
                    }
                    let offer_id = draft.offer_id();
                    let Some(offer) = offers::table
                        .find(offer_id)
                        .select(OfferRow::as_select())
                        .first::<OfferRow>(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(rules::missing(Offers::SINGULAR, offer_id));
                    };
                    let product = products::table
                        .find(offer.product_id)
                        .select(ProductRow::as_select())
                        .first::<ProductRow>(conn)
                        .await?;
                    if !product.is_active {
                        return Ok(rules::inactive_product(offer_id));
                    }
                    let term = product
                        .term
                        .parse::<Term>()
                        .map_err(|err| DieselError::DeserializationError(Box::new(err)))?;
                    let start_date = draft.start_date().unwrap_or(now);
                    let Some(end_date) = subscription_end(start_date, term, offer.number_of_terms)
                    else {
                        return Ok(rules::end_date_out_of_range(offer_id));
                    };
                    let row = diesel::insert_into(orders::table)
                        .values(NewOrderRow {
                            offer_id,
                            customer_id,
                            start_date,
                            end_date,
                            paid: false,
                            cancelled: false,
                            date_created: now,
                            date_modified: now,
                        })
                        .returning(OrderRow::as_returning())
                        .get_result::<OrderRow>(conn)
                        .await?;
                    Ok(Outcome::success(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(outcome.map(Order::from))
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &OrderUpdate,
    ) -> Result<Outcome<Order>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(orders::table.find(id))
            .set(OrderChanges {
                paid: changes.paid(),
                cancelled: changes.cancelled(),
                reason: changes.reason(),
                date_modified: now,
            })
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(match row {
            Some(row) => Outcome::success(Order::from(row)),
            None => rules::missing(Orders::SINGULAR, id),
        })
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(orders::table.find(id))
            .set((orders::cancelled.eq(true), orders::date_modified.eq(now)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Outcome::success(id))
    }
}
