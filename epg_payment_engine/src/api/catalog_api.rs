use std::fmt::Debug;

use log::info;

use crate::{
    db_types::{NewProduct, Product},
    traits::{ShopDatabase, ShopDatabaseError},
};

/// Read-mostly access to the product catalog, plus the one-shot startup seed.
pub struct CatalogApi<B> {
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi")
    }
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CatalogApi<B>
where B: ShopDatabase
{
    pub async fn products(&self) -> Result<Vec<Product>, ShopDatabaseError> {
        self.db.fetch_products().await
    }

    /// Seeds the catalog iff it is empty. Checked once at startup, not per request.
    pub async fn seed_if_empty(&self, products: &[NewProduct]) -> Result<u64, ShopDatabaseError> {
        let inserted = self.db.seed_products_if_empty(products).await?;
        if inserted > 0 {
            info!("🛒️ Seeded {inserted} products into an empty catalog");
        }
        Ok(inserted)
    }
}
