use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use epg_common::Money;
use epg_payment_engine::{
    db_types::NewProduct,
    sqlite::db::create_database_if_missing,
    traits::ShopDatabase,
    CatalogApi,
    PaymentFlowApi,
    SqliteShopDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{failure, health, index, CheckoutRoute, ProductsRoute, SuccessRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    create_database_if_missing(&config.database_url)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let db = SqliteShopDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.create_schema().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let catalog = CatalogApi::new(db.clone());
    catalog.seed_if_empty(&default_catalog()).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// The demo catalog, inserted on first run only.
pub fn default_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct::new("Printer 1", Money::from_major(100), "A great printer"),
        NewProduct::new("Printer 2", Money::from_major(200), "Another printer"),
    ]
}

pub fn create_server_instance(config: ServerConfig, db: SqliteShopDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let payments_api = PaymentFlowApi::new(db.clone(), config.gateway.signing_secret.clone());
        let catalog_api = CatalogApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("epg::access_log"))
            .app_data(web::Data::new(payments_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(config.gateway.clone()))
            .service(health)
            .service(index)
            .service(failure)
            .service(ProductsRoute::<SqliteShopDatabase>::new())
            .service(CheckoutRoute::<SqliteShopDatabase>::new())
            .service(SuccessRoute::<SqliteShopDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
