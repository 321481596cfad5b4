use actix_web::{http::StatusCode, web, web::ServiceConfig};
use epg_payment_engine::{
    db_types::{Order, OrderStatus},
    traits::ShopDatabaseError,
    PaymentFlowApi,
};
use serde_json::json;

use super::{
    helpers::{post_json, sandbox_secret},
    mocks::MockShopDb,
};
use crate::{config::GatewayConfig, routes::CheckoutRoute};

#[actix_web::test]
async fn checkout_returns_a_signed_redirect_form() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "amount": "100", "tax_amount": "13", "transaction_uuid": "tx-1001" });
    let (status, body) = post_json("/checkout", body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="https://rc-epay.esewa.com.np/api/epay/main/v2/form""#));
    assert!(body.contains(r#"name="total_amount" value="113""#));
    assert!(body.contains(r#"name="product_code" value="EPAYTEST""#));
    assert!(body.contains(r#"name="signed_field_names" value="total_amount,transaction_uuid,product_code""#));
    // Known-answer signature for total_amount=113, transaction_uuid=tx-1001, product_code=EPAYTEST
    // under the sandbox key.
    assert!(body.contains(r#"name="signature" value="uTT1L76UJuZB1NvC3x6hpSEKKJkBmO5LPouowgpmF2Y=""#));
    assert!(body.contains(r#"name="success_url" value="http://localhost:3000/success""#));
    assert!(body.contains(r#"name="failure_url" value="http://localhost:3000/failure""#));
}

#[actix_web::test]
async fn checkout_requires_a_transaction_uuid() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "amount": "100" });
    let (status, _) = post_json("/checkout", body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn malformed_transaction_uuids_are_rejected() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "amount": "100", "transaction_uuid": "uh oh <script>" });
    let (status, body) = post_json("/checkout", body, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("alphanumerics"));
}

#[actix_web::test]
async fn no_form_is_returned_when_the_order_cannot_be_recorded() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "amount": "100", "transaction_uuid": "tx-1002" });
    let (status, body) = post_json("/checkout", body, configure_broken_store).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("signature"));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_order().returning(|order| {
        Ok(Order {
            id: 1,
            transaction_uuid: order.transaction_uuid,
            product_code: order.product_code,
            total_amount: order.total_amount,
            status: OrderStatus::Pending,
        })
    });
    register(cfg, db);
}

fn configure_broken_store(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_insert_order().returning(|_| Err(ShopDatabaseError::DatabaseError(sqlx::Error::PoolClosed)));
    register(cfg, db);
}

fn register(cfg: &mut ServiceConfig, db: MockShopDb) {
    let api = PaymentFlowApi::new(db, sandbox_secret());
    cfg.service(CheckoutRoute::<MockShopDb>::new())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(GatewayConfig::default()));
}
