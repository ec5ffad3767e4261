//! Customer storage.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use pagination::{PageRequest, PaginatedList};

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{
    Customer, CustomerDraft, CustomerFilter, Customers, Orders, Outcome, RecordId, Resource, rules,
};
use crate::outbound::persistence::diesel_error_mapping::{
    contains_pattern, map_diesel_error, map_pool_error,
};
use crate::outbound::persistence::models::{CustomerChanges, CustomerRow, NewCustomerRow};
use crate::outbound::persistence::schema::{customers, orders};

use super::{DieselCommerceRepository, page_window, row_exists, total_from_count};

fn filtered(filter: &CustomerFilter) -> customers::BoxedQuery<'static, Pg> {
    let mut query = customers::table.into_boxed();
    if let Some(name) = &filter.name {
        let pattern = contains_pattern(name);
        query = query.filter(
            customers::first_name
                .ilike(pattern.clone())
                .or(customers::last_name.ilike(pattern)),
        );
    }
    if let Some(email) = &filter.email {
        query = query.filter(customers::email_address.ilike(contains_pattern(email)));
    }
    if let Some(offer_id) = filter.offer_id {
        query = query.filter(
            customers::id.eq_any(
                orders::table
                    .filter(orders::offer_id.eq(offer_id))
                    .select(orders::customer_id),
            ),
        );
    }
    query
}

#[async_trait]
impl ResourceRepository<Customers> for DieselCommerceRepository {
    async fn list(
        &self,
        filter: &CustomerFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Customer>, RepositoryError> {
        let (offset, limit) = page_window(request);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (count, rows) = conn
            .transaction(|conn| {
                async move {
                    let count = filtered(filter).count().get_result::<i64>(conn).await?;
                    let rows = filtered(filter)
                        .select(CustomerRow::as_select())
                        .order(customers::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load::<CustomerRow>(conn)
                        .await?;
                    Ok((count, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(Customer::from).collect();
        Ok(PaginatedList::from_page(
            items,
            request,
            total_from_count(count),
        ))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Customer>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first::<CustomerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Customer::from))
    }

    async fn create(&self, draft: &CustomerDraft) -> Result<Outcome<Customer>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let email = draft.email_address();
                    let taken = row_exists!(
                        conn,
                        customers::table.filter(customers::email_address.eq(email))
                    )
                    .await?;
                    if taken {
                        return Ok(rules::email_taken(email));
                    }
                    let row = diesel::insert_into(customers::table)
                        .values(NewCustomerRow {
                            email_address: email,
                            first_name: draft.first_name(),
                            last_name: draft.last_name(),
                            date_created: now,
                            date_modified: now,
                        })
                        .returning(CustomerRow::as_returning())
                        .get_result::<CustomerRow>(conn)
                        .await?;
                    Ok(Outcome::success(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(outcome.map(Customer::from))
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &CustomerDraft,
    ) -> Result<Outcome<Customer>, RepositoryError> {
        let now = self.clock.utc();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    if !row_exists!(conn, customers::table.find(id)).await? {
                        return Ok(rules::missing(Customers::SINGULAR, id));
                    }
                    let email = changes.email_address();
                    let taken = row_exists!(
                        conn,
                        customers::table
                            .filter(customers::email_address.eq(email))
                            .filter(customers::id.ne(id))
                    )
                    .await?;
                    if taken {
                        return Ok(rules::email_taken(email));
                    }
                    let row = diesel::update(customers::table.find(id))
                        .set(CustomerChanges {
                            email_address: email,
                            first_name: changes.first_name(),
                            last_name: changes.last_name(),
                            date_modified: now,
                        })
                        .returning(CustomerRow::as_returning())
                        .get_result::<CustomerRow>(conn)
                        .await?;
                    Ok(Outcome::success(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(outcome.map(Customer::from))
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                if row_exists!(conn, orders::table.filter(orders::customer_id.eq(id))).await? {
                    return Ok(rules::delete_blocked(
                        Customers::SINGULAR,
                        id,
                        Orders::SINGULAR,
                    ));
                }
                diesel::delete(customers::table.find(id)).execute(conn).await?;
                Ok(Outcome::success(id))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
