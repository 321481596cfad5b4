use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewProduct, Product},
    traits::ShopDatabaseError,
};

/// Returns the full catalog, ordered by id.
pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    let products = sqlx::query_as("SELECT * FROM products ORDER BY id").fetch_all(conn).await?;
    Ok(products)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(conn).await?;
    Ok(count)
}

async fn insert_product(product: &NewProduct, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO products (name, price, description) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Inserts the given products iff the catalog is currently empty. The emptiness check and the inserts run
/// inside the caller's connection context, and a non-empty catalog short-circuits without writing anything,
/// so calling this twice never duplicates rows.
pub async fn seed_if_empty(products: &[NewProduct], conn: &mut SqliteConnection) -> Result<u64, ShopDatabaseError> {
    let existing = count(&mut *conn).await?;
    if existing > 0 {
        debug!("🛒️ Catalog already holds {existing} products. Skipping seed.");
        return Ok(0);
    }
    let mut inserted = 0;
    for product in products {
        let id = insert_product(product, &mut *conn).await?;
        debug!("🛒️ Seeded product [{}] with id {id}", product.name);
        inserted += 1;
    }
    Ok(inserted)
}
