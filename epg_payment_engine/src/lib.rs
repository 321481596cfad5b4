//! eSewa Payment Engine
//!
//! The engine contains everything about the payment gateway that is not HTTP: the order and product data types,
//! the storage trait and its SQLite implementation, the signature scheme used to authenticate payment requests
//! and callbacks, and the public APIs that the server crate calls into.
//!
//! The library is divided into three main sections:
//! 1. Storage ([`mod@sqlite`] and [`mod@traits`]). The [`traits::ShopDatabase`] trait describes what a backend
//!    must provide; [`SqliteShopDatabase`] is the only implementation in current scope. You should never need to
//!    touch the database directly — go through the APIs. The exception is the data types, which are defined in
//!    [`mod@db_types`] and are public.
//! 2. The signature scheme ([`helpers::payment_signature`]). Pure functions, no state. Both the outbound request
//!    signature and the inbound callback verification go through here.
//! 3. The public API objects ([`mod@api`]). [`PaymentFlowApi`] drives checkout initiation and callback
//!    processing; [`CatalogApi`] covers the (read-mostly) product catalog.
pub mod api;
pub mod db_types;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::{CatalogApi, PaymentFlowApi};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteShopDatabase;
