//! Domain primitives, entities and ports.
//!
//! Purpose: define the subscription-commerce entities (brands, products,
//! offers, customers and orders), the validated write inputs that reach
//! storage, and the [`Outcome`] contract used to report expected refusals.
//! Nothing here depends on HTTP or on a storage technology.
//!
//! Public surface:
//! - `Error`, `ErrorCode`: transport-agnostic error payload.
//! - `Outcome`: success/failure carrier for business rules.
//! - `Resource` plus one marker type per resource (`Brands`, `Products`,
//!   `Offers`, `Customers`, `Orders`).
//! - `ports::ResourceRepository`: the storage port.

pub mod brand;
pub mod customer;
pub mod error;
pub mod offer;
pub mod order;
pub mod outcome;
pub mod ports;
pub mod product;
pub mod resource;
pub mod rules;
pub mod trace_id;
pub mod validation;

pub use self::brand::{Brand, BrandDraft, BrandFilter, Brands};
pub use self::customer::{Customer, CustomerDraft, CustomerFilter, Customers};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::offer::{Offer, OfferDraft, OfferFilter, Offers, Price};
pub use self::order::{Order, OrderDraft, OrderFilter, OrderUpdate, Orders, subscription_end};
pub use self::outcome::{EmptyFailureReason, FailureReason, Outcome};
pub use self::product::{Product, ProductDraft, ProductFilter, Products, Term};
pub use self::resource::{RecordId, Resource};
pub use self::trace_id::TraceId;
pub use self::validation::DraftValidationError;
