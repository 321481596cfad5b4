use thiserror::Error;

use crate::db_types::{NewOrder, NewProduct, Order, OrderStatus, Product, TransactionUuid};

/// This trait defines the storage behaviour a backend must provide to support the payment gateway.
///
/// This behaviour includes:
/// * Recording new orders at checkout initiation
/// * Transitioning order status in response to verified callbacks
/// * Serving and seeding the product catalog
///
/// All mutations are single-row inserts or single-row conditional updates keyed by the transaction uuid,
/// so implementations need no locking beyond what the storage engine provides per statement.
#[allow(async_fn_in_trait)]
pub trait ShopDatabase {
    /// Creates the `products` and `orders` tables if they do not exist. Safe to call on every startup.
    async fn create_schema(&self) -> Result<(), ShopDatabaseError>;

    /// Inserts a new order in `Pending` status and returns the stored record.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, ShopDatabaseError>;

    /// Sets the status of the order matching `transaction_uuid`, returning the number of rows affected.
    ///
    /// Matching zero rows is not an error at this layer. The caller decides whether a zero count is
    /// meaningful (e.g. a callback for a transaction that was never initiated here).
    async fn update_order_status(
        &self,
        transaction_uuid: &TransactionUuid,
        status: OrderStatus,
    ) -> Result<u64, ShopDatabaseError>;

    /// Returns the order matching `transaction_uuid`, if any.
    async fn fetch_order_by_transaction(
        &self,
        transaction_uuid: &TransactionUuid,
    ) -> Result<Option<Order>, ShopDatabaseError>;

    /// Returns the full product catalog, ordered by id.
    async fn fetch_products(&self) -> Result<Vec<Product>, ShopDatabaseError>;

    /// Inserts the given products iff the catalog is currently empty, returning the number inserted.
    /// Calling this twice never duplicates rows.
    async fn seed_products_if_empty(&self, products: &[NewProduct]) -> Result<u64, ShopDatabaseError>;
}

#[derive(Debug, Error)]
pub enum ShopDatabaseError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
