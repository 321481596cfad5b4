use actix_web::{http::StatusCode, web, web::ServiceConfig};
use epg_payment_engine::{db_types::OrderStatus, helpers::sign_fields, PaymentFlowApi};
use serde_json::json;

use super::{
    helpers::{encode_query_value, get_request, sandbox_secret},
    mocks::MockShopDb,
};
use crate::routes::{failure, SuccessRoute};

#[actix_web::test]
async fn verified_callback_completes_the_order() {
    let _ = env_logger::try_init().ok();
    let data = signed_callback("110", "240613-001");
    let uri = format!("/success?data={}", encode_query_value(&data));
    let (status, body) = get_request(&uri, configure_one_matching_order).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Payment successful!");
}

#[actix_web::test]
async fn tampered_signatures_are_reported_and_nothing_is_updated() {
    let _ = env_logger::try_init().ok();
    let good = sign_fields(&sandbox_secret(), &[
        ("total_amount", "110"),
        ("transaction_uuid", "240613-001"),
        ("product_code", "EPAYTEST"),
    ]);
    let bad = if good.starts_with('A') { format!("B{}", &good[1..]) } else { format!("A{}", &good[1..]) };
    let payload = json!({
        "total_amount": "110",
        "transaction_uuid": "240613-001",
        "product_code": "EPAYTEST",
        "signed_field_names": "total_amount,transaction_uuid,product_code",
        "signature": bad,
    });
    let data = base64::encode(payload.to_string());
    let uri = format!("/success?data={}", encode_query_value(&data));
    let (status, body) = get_request(&uri, configure_never_updates).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Payment verification failed!");
}

#[actix_web::test]
async fn verified_callback_for_an_unknown_transaction_still_reads_ok() {
    let _ = env_logger::try_init().ok();
    let data = signed_callback("55", "never-initiated");
    let uri = format!("/success?data={}", encode_query_value(&data));
    let (status, body) = get_request(&uri, configure_no_matching_order).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Payment successful!");
}

#[actix_web::test]
async fn missing_data_parameter_is_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/success", configure_never_updates).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "No data");
}

#[actix_web::test]
async fn undecodable_payloads_are_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/success?data=certainly-not-base64!!!", configure_never_updates).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "No data");
}

#[actix_web::test]
async fn failure_redirect_tells_the_payer_the_payment_did_not_happen() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/failure", configure_failure_only).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Payment failed or canceled.");
}

/// Builds a base64 callback payload signed with the sandbox key, the way the gateway does it.
fn signed_callback(total_amount: &str, transaction_uuid: &str) -> String {
    let fields =
        [("total_amount", total_amount), ("transaction_uuid", transaction_uuid), ("product_code", "EPAYTEST")];
    let signature = sign_fields(&sandbox_secret(), &fields);
    let payload = json!({
        "transaction_code": "000AWEO",
        "status": "COMPLETE",
        "total_amount": total_amount,
        "transaction_uuid": transaction_uuid,
        "product_code": "EPAYTEST",
        "signed_field_names": "total_amount,transaction_uuid,product_code",
        "signature": signature,
    });
    base64::encode(payload.to_string())
}

fn configure_one_matching_order(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_update_order_status()
        .withf(|uuid, status| uuid.as_str() == "240613-001" && *status == OrderStatus::Complete)
        .returning(|_, _| Ok(1));
    register(cfg, db);
}

fn configure_no_matching_order(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_update_order_status().returning(|_, _| Ok(0));
    register(cfg, db);
}

fn configure_never_updates(cfg: &mut ServiceConfig) {
    let mut db = MockShopDb::new();
    db.expect_update_order_status().never();
    register(cfg, db);
}

fn configure_failure_only(cfg: &mut ServiceConfig) {
    cfg.service(failure);
}

fn register(cfg: &mut ServiceConfig, db: MockShopDb) {
    let api = PaymentFlowApi::new(db, sandbox_secret());
    cfg.service(SuccessRoute::<MockShopDb>::new()).app_data(web::Data::new(api));
}
