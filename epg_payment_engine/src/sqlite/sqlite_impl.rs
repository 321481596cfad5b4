//! `SqliteShopDatabase` is the concrete SQLite implementation of the shop storage backend.
//!
//! It is a thin veneer: each trait method acquires a connection from the pool and delegates to the query
//! functions in [`super::db`].
use std::fmt::Debug;

use sqlx::SqlitePool;

use super::db::{create_tables, new_pool, orders, products};
use crate::{
    db_types::{NewOrder, NewProduct, Order, OrderStatus, Product, TransactionUuid},
    traits::{ShopDatabase, ShopDatabaseError},
};

#[derive(Clone)]
pub struct SqliteShopDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteShopDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteShopDatabase ({:?})", self.pool)
    }
}

impl SqliteShopDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, ShopDatabaseError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl ShopDatabase for SqliteShopDatabase {
    async fn create_schema(&self) -> Result<(), ShopDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        create_tables(&mut conn).await?;
        Ok(())
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, ShopDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_order(order, &mut conn).await
    }

    async fn update_order_status(
        &self,
        transaction_uuid: &TransactionUuid,
        status: OrderStatus,
    ) -> Result<u64, ShopDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        orders::update_order_status(transaction_uuid, status, &mut conn).await
    }

    async fn fetch_order_by_transaction(
        &self,
        transaction_uuid: &TransactionUuid,
    ) -> Result<Option<Order>, ShopDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_transaction(transaction_uuid, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, ShopDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let result = products::fetch_all(&mut conn).await?;
        Ok(result)
    }

    async fn seed_products_if_empty(&self, new_products: &[NewProduct]) -> Result<u64, ShopDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        products::seed_if_empty(new_products, &mut conn).await
    }
}
