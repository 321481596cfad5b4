use epg_payment_engine::{
    db_types::{NewOrder, NewProduct, Order, OrderStatus, Product, TransactionUuid},
    traits::{ShopDatabase, ShopDatabaseError},
};
use mockall::mock;

mock! {
    pub ShopDb {}
    impl ShopDatabase for ShopDb {
        async fn create_schema(&self) -> Result<(), ShopDatabaseError>;
        async fn insert_order(&self, order: NewOrder) -> Result<Order, ShopDatabaseError>;
        async fn update_order_status(&self, transaction_uuid: &TransactionUuid, status: OrderStatus) -> Result<u64, ShopDatabaseError>;
        async fn fetch_order_by_transaction(&self, transaction_uuid: &TransactionUuid) -> Result<Option<Order>, ShopDatabaseError>;
        async fn fetch_products(&self) -> Result<Vec<Product>, ShopDatabaseError>;
        async fn seed_products_if_empty(&self, products: &[NewProduct]) -> Result<u64, ShopDatabaseError>;
    }
}
