mod shop_database;

pub use shop_database::{ShopDatabase, ShopDatabaseError};
