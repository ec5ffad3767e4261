//! Process-local storage used when no database is configured.
//!
//! Applies the same business rules and wording as the PostgreSQL adapter so
//! the HTTP surface behaves identically against either store. Rows live in
//! ordered maps keyed by identity, which gives list operations the ascending
//! identity order pagination expects. Contents are lost on restart.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, PaginatedList};

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{
    Brand, BrandDraft, BrandFilter, Brands, Customer, CustomerDraft, CustomerFilter, Customers,
    Offer, OfferDraft, OfferFilter, Offers, Order, OrderDraft, OrderFilter, OrderUpdate, Orders,
    Outcome, Product, ProductDraft, ProductFilter, Products, RecordId, Resource, rules,
    subscription_end,
};

/// Monotonic identity source mirroring a `SERIAL` column.
#[derive(Debug, Default)]
struct Sequence(RecordId);

impl Sequence {
    fn next(&mut self) -> Result<RecordId, RepositoryError> {
        let id = self
            .0
            .checked_add(1)
            .ok_or_else(|| RepositoryError::query("identity sequence exhausted"))?;
        self.0 = id;
        Ok(id)
    }
}

#[derive(Debug, Default)]
struct Tables {
    brands: BTreeMap<RecordId, Brand>,
    products: BTreeMap<RecordId, Product>,
    offers: BTreeMap<RecordId, Offer>,
    customers: BTreeMap<RecordId, Customer>,
    orders: BTreeMap<RecordId, Order>,
    brand_ids: Sequence,
    product_ids: Sequence,
    offer_ids: Sequence,
    customer_ids: Sequence,
    order_ids: Sequence,
}

/// In-memory implementation of the resource storage port.
pub struct InMemoryCommerceRepository {
    tables: Mutex<Tables>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCommerceRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            clock,
        }
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::query("in-memory store lock poisoned"))
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn brand_matches(brand: &Brand, filter: &BrandFilter) -> bool {
    filter
        .name
        .as_deref()
        .is_none_or(|name| contains_ci(&brand.name, name))
}

fn product_matches(tables: &Tables, product: &Product, filter: &ProductFilter) -> bool {
    let name_ok = filter
        .name
        .as_deref()
        .is_none_or(|name| contains_ci(&product.name, name));
    let brand_ok = filter.brand_name.as_deref().is_none_or(|brand_name| {
        tables
            .brands
            .get(&product.brand_id)
            .is_some_and(|brand| contains_ci(&brand.name, brand_name))
    });
    let active_ok = filter
        .is_active
        .is_none_or(|active| product.is_active == active);
    name_ok && brand_ok && active_ok
}

fn offer_matches(tables: &Tables, offer: &Offer, filter: &OfferFilter) -> bool {
    let description_ok = filter.description.as_deref().is_none_or(|needle| {
        offer
            .description
            .as_deref()
            .is_some_and(|description| contains_ci(description, needle))
    });
    let product_ok = filter
        .product_id
        .is_none_or(|product_id| offer.product_id == product_id);
    let active_ok = filter.active_product.is_none_or(|active| {
        tables
            .products
            .get(&offer.product_id)
            .is_some_and(|product| product.is_active == active)
    });
    description_ok && product_ok && active_ok
}

fn customer_matches(tables: &Tables, customer: &Customer, filter: &CustomerFilter) -> bool {
    let name_ok = filter.name.as_deref().is_none_or(|name| {
        contains_ci(&customer.first_name, name) || contains_ci(&customer.last_name, name)
    });
    let email_ok = filter
        .email
        .as_deref()
        .is_none_or(|email| contains_ci(&customer.email_address, email));
    let offer_ok = filter.offer_id.is_none_or(|offer_id| {
        tables
            .orders
            .values()
            .any(|order| order.customer_id == customer.id && order.offer_id == offer_id)
    });
    name_ok && email_ok && offer_ok
}

fn order_matches(order: &Order, filter: &OrderFilter) -> bool {
    filter
        .offer_id
        .is_none_or(|offer_id| order.offer_id == offer_id)
        && filter
            .customer_id
            .is_none_or(|customer_id| order.customer_id == customer_id)
}

#[async_trait]
impl ResourceRepository<Brands> for InMemoryCommerceRepository {
    async fn list(
        &self,
        filter: &BrandFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Brand>, RepositoryError> {
        let tables = self.tables()?;
        let matching = tables
            .brands
            .values()
            .filter(|brand| brand_matches(brand, filter))
            .cloned();
        Ok(PaginatedList::from_ordered(matching, request))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Brand>, RepositoryError> {
        Ok(self.tables()?.brands.get(&id).cloned())
    }

    async fn create(&self, draft: &BrandDraft) -> Result<Outcome<Brand>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        let id = tables.brand_ids.next()?;
        let brand = Brand {
            id,
            name: draft.name().to_owned(),
            date_created: now,
            date_modified: now,
        };
        tables.brands.insert(id, brand.clone());
        Ok(Outcome::success(brand))
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &BrandDraft,
    ) -> Result<Outcome<Brand>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        let Some(brand) = tables.brands.get_mut(&id) else {
            return Ok(rules::missing(Brands::SINGULAR, id));
        };
        changes.name().clone_into(&mut brand.name);
        brand.date_modified = now;
        Ok(Outcome::success(brand.clone()))
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.products.values().any(|product| product.brand_id == id) {
            return Ok(rules::delete_blocked(
                Brands::SINGULAR,
                id,
                Products::SINGULAR,
            ));
        }
        tables.brands.remove(&id);
        Ok(Outcome::success(id))
    }
}

#[async_trait]
impl ResourceRepository<Products> for InMemoryCommerceRepository {
    async fn list(
        &self,
        filter: &ProductFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Product>, RepositoryError> {
        let tables = self.tables()?;
        let matching = tables
            .products
            .values()
            .filter(|product| product_matches(&tables, product, filter))
            .cloned();
        Ok(PaginatedList::from_ordered(matching, request))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.tables()?.products.get(&id).cloned())
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Outcome<Product>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        if !tables.brands.contains_key(&draft.brand_id()) {
            return Ok(rules::missing(Brands::SINGULAR, draft.brand_id()));
        }
        let id = tables.product_ids.next()?;
        let product = Product {
            id,
            name: draft.name().to_owned(),
            is_active: draft.is_active(),
            term: draft.term(),
            brand_id: draft.brand_id(),
            date_created: now,
            date_modified: now,
        };
        tables.products.insert(id, product.clone());
        Ok(Outcome::success(product))
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &ProductDraft,
    ) -> Result<Outcome<Product>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        if !tables.brands.contains_key(&changes.brand_id()) {
            return Ok(rules::missing(Brands::SINGULAR, changes.brand_id()));
        }
        if !tables.products.contains_key(&id) {
            return Ok(rules::missing(Products::SINGULAR, id));
        }
        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(rules::missing(Products::SINGULAR, id));
        };
        changes.name().clone_into(&mut product.name);
        product.is_active = changes.is_active();
        product.term = changes.term();
        product.brand_id = changes.brand_id();
        product.date_modified = now;
        Ok(Outcome::success(product.clone()))
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.offers.values().any(|offer| offer.product_id == id) {
            return Ok(rules::delete_blocked(
                Products::SINGULAR,
                id,
                Offers::SINGULAR,
            ));
        }
        tables.products.remove(&id);
        Ok(Outcome::success(id))
    }
}

#[async_trait]
impl ResourceRepository<Offers> for InMemoryCommerceRepository {
    async fn list(
        &self,
        filter: &OfferFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Offer>, RepositoryError> {
        let tables = self.tables()?;
        let matching = tables
            .offers
            .values()
            .filter(|offer| offer_matches(&tables, offer, filter))
            .cloned();
        Ok(PaginatedList::from_ordered(matching, request))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Offer>, RepositoryError> {
        Ok(self.tables()?.offers.get(&id).cloned())
    }

    async fn create(&self, draft: &OfferDraft) -> Result<Outcome<Offer>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        if !tables.products.contains_key(&draft.product_id()) {
            return Ok(rules::missing(Products::SINGULAR, draft.product_id()));
        }
        let id = tables.offer_ids.next()?;
        let offer = Offer {
            id,
            product_id: draft.product_id(),
            description: draft.description().map(str::to_owned),
            price: draft.price(),
            number_of_terms: draft.number_of_terms(),
            date_created: now,
            date_modified: now,
        };
        tables.offers.insert(id, offer.clone());
        Ok(Outcome::success(offer))
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &OfferDraft,
    ) -> Result<Outcome<Offer>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        if !tables.products.contains_key(&changes.product_id()) {
            return Ok(rules::missing(Products::SINGULAR, changes.product_id()));
        }
        if !tables.offers.contains_key(&id) {
            return Ok(rules::missing(Offers::SINGULAR, id));
        }
        let Some(offer) = tables.offers.get_mut(&id) else {
            return Ok(rules::missing(Offers::SINGULAR, id));
        };
        offer.product_id = changes.product_id();
        offer.description = changes.description().map(str::to_owned);
        offer.price = changes.price();
        offer.number_of_terms = changes.number_of_terms();
        offer.date_modified = now;
        Ok(Outcome::success(offer.clone()))
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.orders.values().any(|order| order.offer_id == id) {
            return Ok(rules::delete_blocked(Offers::SINGULAR, id, Orders::SINGULAR));
        }
        tables.offers.remove(&id);
        Ok(Outcome::success(id))
    }
}

#[async_trait]
impl ResourceRepository<Customers> for InMemoryCommerceRepository {
    async fn list(
        &self,
        filter: &CustomerFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Customer>, RepositoryError> {
        let tables = self.tables()?;
        let matching = tables
            .customers
            .values()
            .filter(|customer| customer_matches(&tables, customer, filter))
            .cloned();
        Ok(PaginatedList::from_ordered(matching, request))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.tables()?.customers.get(&id).cloned())
    }

    async fn create(&self, draft: &CustomerDraft) -> Result<Outcome<Customer>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        let email = draft.email_address();
        if tables
            .customers
            .values()
            .any(|customer| customer.email_address == email)
        {
            return Ok(rules::email_taken(email));
        }
        let id = tables.customer_ids.next()?;
        let customer = Customer {
            id,
            email_address: email.to_owned(),
            first_name: draft.first_name().to_owned(),
            last_name: draft.last_name().to_owned(),
            date_created: now,
            date_modified: now,
        };
        tables.customers.insert(id, customer.clone());
        Ok(Outcome::success(customer))
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &CustomerDraft,
    ) -> Result<Outcome<Customer>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        let email = changes.email_address();
        if !tables.customers.contains_key(&id) {
            return Ok(rules::missing(Customers::SINGULAR, id));
        }
        if tables
            .customers
            .values()
            .any(|customer| customer.id != id && customer.email_address == email)
        {
            return Ok(rules::email_taken(email));
        }
        let Some(customer) = tables.customers.get_mut(&id) else {
            return Ok(rules::missing(Customers::SINGULAR, id));
        };
        email.clone_into(&mut customer.email_address);
        changes.first_name().clone_into(&mut customer.first_name);
        changes.last_name().clone_into(&mut customer.last_name);
        customer.date_modified = now;
        Ok(Outcome::success(customer.clone()))
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.orders.values().any(|order| order.customer_id == id) {
            return Ok(rules::delete_blocked(
                Customers::SINGULAR,
                id,
                Orders::SINGULAR,
            ));
        }
        tables.customers.remove(&id);
        Ok(Outcome::success(id))
    }
}

#[async_trait]
impl ResourceRepository<Orders> for InMemoryCommerceRepository {
    async fn list(
        &self,
        filter: &OrderFilter,
        request: PageRequest,
    ) -> Result<PaginatedList<Order>, RepositoryError> {
        let tables = self.tables()?;
        let matching = tables
            .orders
            .values()
            .filter(|order| order_matches(order, filter))
            .cloned();
        Ok(PaginatedList::from_ordered(matching, request))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.tables()?.orders.get(&id).cloned())
    }

    async fn create(&self, draft: &OrderDraft) -> Result<Outcome<Order>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        let customer_id = draft.customer_id();
        if !tables.customers.contains_key(&customer_id) {
            return Ok(rules::missing(Customers::SINGULAR, customer_id));
        }
        let offer_id = draft.offer_id();
        let Some(offer) = tables.offers.get(&offer_id) else {
            return Ok(rules::missing(Offers::SINGULAR, offer_id));
        };
        let Some(product) = tables.products.get(&offer.product_id) else {
            return Err(RepositoryError::query(format!(
                "offer {offer_id} references a missing product"
            )));
        };
        if !product.is_active {
            return Ok(rules::inactive_product(offer_id));
        }
        let start_date = draft.start_date().unwrap_or(now);
        let Some(end_date) = subscription_end(start_date, product.term, offer.number_of_terms)
        else {
            return Ok(rules::end_date_out_of_range(offer_id));
        };
        let id = tables.order_ids.next()?;
        let order = Order {
            id,
            offer_id,
            customer_id,
            start_date,
            end_date,
            paid: false,
            cancelled: false,
            reason: None,
            date_created: now,
            date_modified: now,
        };
        tables.orders.insert(id, order.clone());
        Ok(Outcome::success(order))
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &OrderUpdate,
    ) -> Result<Outcome<Order>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        let Some(order) = tables.orders.get_mut(&id) else {
            return Ok(rules::missing(Orders::SINGULAR, id));
        };
        order.paid = changes.paid();
        order.cancelled = changes.cancelled();
        order.reason = changes.reason().map(str::to_owned);
        order.date_modified = now;
        Ok(Outcome::success(order.clone()))
    }

    async fn delete(&self, id: RecordId) -> Result<Outcome<RecordId>, RepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.tables()?;
        if let Some(order) = tables.orders.get_mut(&id) {
            order.cancelled = true;
            order.date_modified = now;
        }
        Ok(Outcome::success(id))
    }
}
