use std::fmt::Debug;

use epg_common::Secret;
use log::*;

use crate::{
    api::{
        errors::PaymentFlowError,
        payment_objects::{CallbackOutcome, CallbackPayload, CheckoutRequest, PaymentInit},
    },
    db_types::{NewOrder, OrderStatus, TransactionUuid},
    helpers::{sign_fields, verify_fields},
    traits::ShopDatabase,
};

/// The merchant code used when a checkout request does not name one. This is the eSewa sandbox code.
pub const DEFAULT_PRODUCT_CODE: &str = "EPAYTEST";

/// The canonical outbound field order. Inbound callbacks declare their own order and that declaration wins.
pub const SIGNED_FIELD_NAMES: &str = "total_amount,transaction_uuid,product_code";

/// `PaymentFlowApi` drives the two halves of the redirect payment flow: building a signed payment request
/// (and recording the `PENDING` order), and verifying the signed callback that reports the outcome.
///
/// The shared signing secret is injected at construction and never read from ambient state, so tests can
/// substitute fixtures.
pub struct PaymentFlowApi<B> {
    db: B,
    secret: Secret<String>,
}

impl<B> Debug for PaymentFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B> PaymentFlowApi<B> {
    pub fn new(db: B, secret: Secret<String>) -> Self {
        Self { db, secret }
    }
}

impl<B> PaymentFlowApi<B>
where B: ShopDatabase
{
    /// Initiates a checkout: validates the request, computes the total, signs the canonical field list and
    /// records the `PENDING` order.
    ///
    /// Initiation is atomic with respect to the order record. The insert happens first, and a storage
    /// failure fails the whole request — a signed payment form is never handed out for an order that is
    /// not on record.
    pub async fn initiate_checkout(&self, request: CheckoutRequest) -> Result<PaymentInit, PaymentFlowError> {
        if !request.transaction_uuid.is_well_formed() {
            return Err(PaymentFlowError::InvalidRequest(
                "transaction_uuid is required and may only contain alphanumerics, '-' and '_'".to_string(),
            ));
        }
        if request.product_code.is_empty() || !request.product_code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PaymentFlowError::InvalidRequest("product_code must be alphanumeric".to_string()));
        }
        let total_amount =
            request.amount + request.tax_amount + request.product_service_charge + request.product_delivery_charge;
        if total_amount.is_negative() {
            return Err(PaymentFlowError::InvalidRequest(format!("total amount is negative ({total_amount})")));
        }
        let total_str = total_amount.to_string();
        let fields = [
            ("total_amount", total_str.as_str()),
            ("transaction_uuid", request.transaction_uuid.as_str()),
            ("product_code", request.product_code.as_str()),
        ];
        let signature = sign_fields(&self.secret, &fields);
        let order =
            NewOrder::new(request.transaction_uuid.clone(), request.product_code.clone(), total_amount);
        let order = self.db.insert_order(order).await?;
        debug!("💳️ Order [{}] recorded as PENDING with id {} for {total_amount}", order.transaction_uuid, order.id);
        Ok(PaymentInit {
            amount: request.amount,
            tax_amount: request.tax_amount,
            total_amount,
            transaction_uuid: request.transaction_uuid,
            product_code: request.product_code,
            product_service_charge: request.product_service_charge,
            product_delivery_charge: request.product_delivery_charge,
            signed_field_names: SIGNED_FIELD_NAMES.to_string(),
            signature,
        })
    }

    /// Processes a base64-encoded callback payload from the gateway redirect.
    ///
    /// The message to verify is reconstructed from the payload's *own* `signed_field_names` declaration,
    /// in the declared order. Signature mismatch is a normal, reportable outcome — an attempted forgery or
    /// a corrupted redirect — and leaves the order untouched. Each callback is processed exactly once,
    /// synchronously; there is no retry.
    pub async fn handle_callback(&self, encoded: &str) -> Result<CallbackOutcome, PaymentFlowError> {
        let raw = base64::decode(encoded.trim())
            .map_err(|e| PaymentFlowError::BadPayload(format!("Payload is not valid base64. {e}")))?;
        let payload: CallbackPayload = serde_json::from_slice(&raw)
            .map_err(|e| PaymentFlowError::BadPayload(format!("Payload is not a well-formed callback record. {e}")))?;
        let mut fields = Vec::new();
        for name in payload.signed_field_names.split(',').map(str::trim) {
            match payload.field_value(name) {
                Some(value) => fields.push((name, value)),
                None => {
                    warn!("💳️ Callback declares signed field '{name}' but carries no value for it. Rejecting.");
                    return Ok(CallbackOutcome::VerificationFailed);
                },
            }
        }
        if !verify_fields(&self.secret, &fields, &payload.signature) {
            warn!("💳️ Callback signature did not verify. Order left unchanged.");
            return Ok(CallbackOutcome::VerificationFailed);
        }
        let transaction_uuid = payload
            .transaction_uuid
            .clone()
            .map(TransactionUuid::from)
            .ok_or_else(|| PaymentFlowError::BadPayload("Callback does not identify a transaction".to_string()))?;
        let affected = self.db.update_order_status(&transaction_uuid, OrderStatus::Complete).await?;
        if affected == 0 {
            warn!("💳️ Verified callback for transaction [{transaction_uuid}], but no matching order exists");
            Ok(CallbackOutcome::UnknownTransaction { transaction_uuid })
        } else {
            info!("💳️ Order [{transaction_uuid}] marked as COMPLETE");
            Ok(CallbackOutcome::Completed { transaction_uuid })
        }
    }
}
