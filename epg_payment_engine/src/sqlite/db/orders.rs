use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderStatus, TransactionUuid},
    traits::ShopDatabaseError,
};

/// Inserts a new order in `PENDING` status using the given connection, returning the stored row.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, ShopDatabaseError> {
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                transaction_uuid,
                product_code,
                total_amount,
                status
            ) VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(order.transaction_uuid)
    .bind(order.product_code)
    .bind(order.total_amount)
    .bind(OrderStatus::Pending.to_string())
    .fetch_one(conn)
    .await?;
    debug!("📝️ Order [{}] inserted with id {}", order.transaction_uuid, order.id);
    Ok(order)
}

/// Returns the order matching the given `transaction_uuid`, if any.
pub async fn fetch_order_by_transaction(
    transaction_uuid: &TransactionUuid,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE transaction_uuid = $1")
        .bind(transaction_uuid.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Sets the status of the order matching `transaction_uuid` and returns the number of rows affected.
/// A zero count means the transaction is unknown to this store; the caller decides what that means.
pub async fn update_order_status(
    transaction_uuid: &TransactionUuid,
    status: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<u64, ShopDatabaseError> {
    let result = sqlx::query("UPDATE orders SET status = $1 WHERE transaction_uuid = $2")
        .bind(status.to_string())
        .bind(transaction_uuid.as_str())
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
