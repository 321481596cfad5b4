use actix_web::{http::StatusCode, web, web::ServiceConfig};
use epg_common::Money;
use epg_payment_engine::{db_types::Product, traits::ShopDatabaseError, CatalogApi};

use super::{helpers::get_request, mocks::MockShopDb};
use crate::routes::ProductsRoute;

#[actix_web::test]
async fn fetch_product_catalog() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/products", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, CATALOG_JSON);
}

#[actix_web::test]
async fn catalog_storage_errors_become_500s() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/products", configure_broken_store).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("error"));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_fetch_products().returning(|| Ok(catalog()));
    cfg.service(ProductsRoute::<MockShopDb>::new()).app_data(web::Data::new(CatalogApi::new(db)));
}

fn configure_broken_store(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_fetch_products().returning(|| Err(ShopDatabaseError::DatabaseError(sqlx::Error::PoolClosed)));
    cfg.service(ProductsRoute::<MockShopDb>::new()).app_data(web::Data::new(CatalogApi::new(db)));
}

// Mock response to the `fetch_products` call
fn catalog() -> Vec<Product> {
    vec![
        Product { id: 1, name: "Printer 1".into(), price: Money::from_major(100), description: "A great printer".into() },
        Product { id: 2, name: "Printer 2".into(), price: Money::from_major(200), description: "Another printer".into() },
    ]
}

const CATALOG_JSON: &str = r#"[{"id":1,"name":"Printer 1","price":"100","description":"A great printer"},{"id":2,"name":"Printer 2","price":"200","description":"Another printer"}]"#;
