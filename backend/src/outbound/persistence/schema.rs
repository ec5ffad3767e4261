//! Diesel table definitions for the commerce schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate
//! them with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Brands owning products.
    brands (id) {
        id -> Int4,
        /// Display name (max 50 characters).
        name -> Varchar,
        date_created -> Timestamptz,
        date_modified -> Timestamptz,
    }
}

diesel::table! {
    /// Products sold under a brand.
    products (id) {
        id -> Int4,
        /// Display name (max 50 characters).
        name -> Varchar,
        is_active -> Bool,
        /// `monthly` or `annually`.
        term -> Varchar,
        brand_id -> Int4,
        date_created -> Timestamptz,
        date_modified -> Timestamptz,
    }
}

diesel::table! {
    /// Priced offers for a product.
    offers (id) {
        id -> Int4,
        product_id -> Int4,
        /// Optional description (max 100 characters).
        description -> Nullable<Varchar>,
        /// Price of one term in cents (0 to 999 999).
        price_cents -> Int8,
        number_of_terms -> Int4,
        date_created -> Timestamptz,
        date_modified -> Timestamptz,
    }
}

diesel::table! {
    /// Registered customers; the e-mail address is unique.
    customers (id) {
        id -> Int4,
        email_address -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        date_created -> Timestamptz,
        date_modified -> Timestamptz,
    }
}

diesel::table! {
    /// Customer subscriptions to offers.
    orders (id) {
        id -> Int4,
        offer_id -> Int4,
        customer_id -> Int4,
        start_date -> Timestamptz,
        end_date -> Timestamptz,
        paid -> Bool,
        cancelled -> Bool,
        /// Cancellation reason (max 50 characters).
        reason -> Nullable<Varchar>,
        date_created -> Timestamptz,
        date_modified -> Timestamptz,
    }
}

diesel::joinable!(products -> brands (brand_id));
diesel::joinable!(offers -> products (product_id));
diesel::joinable!(orders -> offers (offer_id));
diesel::joinable!(orders -> customers (customer_id));

diesel::allow_tables_to_appear_in_same_query!(brands, products, offers, customers, orders);
