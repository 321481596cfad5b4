use epg_common::Money;
use serde::{Deserialize, Serialize};

use crate::db_types::TransactionUuid;

//--------------------------------------   CheckoutRequest   ---------------------------------------------------------
/// The body of a checkout initiation call. `amount` and `transaction_uuid` are required; the remaining
/// amount components default to zero and the product code defaults to the sandbox test code.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub amount: Money,
    #[serde(default)]
    pub tax_amount: Money,
    #[serde(default)]
    pub product_service_charge: Money,
    #[serde(default)]
    pub product_delivery_charge: Money,
    pub transaction_uuid: TransactionUuid,
    #[serde(default = "default_product_code")]
    pub product_code: String,
}

fn default_product_code() -> String {
    super::payment_flow_api::DEFAULT_PRODUCT_CODE.to_string()
}

impl CheckoutRequest {
    pub fn new(amount: Money, transaction_uuid: &str) -> Self {
        Self {
            amount,
            tax_amount: Money::default(),
            product_service_charge: Money::default(),
            product_delivery_charge: Money::default(),
            transaction_uuid: TransactionUuid::from(transaction_uuid.to_string()),
            product_code: default_product_code(),
        }
    }

    pub fn with_tax(mut self, tax_amount: Money) -> Self {
        self.tax_amount = tax_amount;
        self
    }
}

//--------------------------------------     PaymentInit     ---------------------------------------------------------
/// Everything the payer's browser must post to the gateway: the declared amount components, the computed
/// total, the signed field list and the signature. The server crate renders this as an auto-submitting
/// HTML form; the engine only guarantees the values are signed and the order is on record.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentInit {
    pub amount: Money,
    pub tax_amount: Money,
    pub total_amount: Money,
    pub transaction_uuid: TransactionUuid,
    pub product_code: String,
    pub product_service_charge: Money,
    pub product_delivery_charge: Money,
    pub signed_field_names: String,
    pub signature: String,
}

//--------------------------------------   CallbackPayload   ---------------------------------------------------------
/// The decoded callback record posted back by the gateway after payment.
///
/// This is a closed schema: only the fields below can ever participate in signature verification, and
/// anything else in the payload is ignored on decode. A `signed_field_names` entry outside this set is a
/// verification failure, so spoofed extra fields cannot influence anything beyond the verified set.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackPayload {
    #[serde(default)]
    pub transaction_code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_amount: Option<String>,
    #[serde(default)]
    pub transaction_uuid: Option<String>,
    #[serde(default)]
    pub product_code: Option<String>,
    pub signed_field_names: String,
    pub signature: String,
}

impl CallbackPayload {
    /// Looks up the value of a declared signed field. `None` means the name is either outside the known
    /// field set or absent from this payload — both verification failures for the caller.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        match name {
            "transaction_code" => self.transaction_code.as_deref(),
            "status" => self.status.as_deref(),
            "total_amount" => self.total_amount.as_deref(),
            "transaction_uuid" => self.transaction_uuid.as_deref(),
            "product_code" => self.product_code.as_deref(),
            "signed_field_names" => Some(self.signed_field_names.as_str()),
            _ => None,
        }
    }
}

//--------------------------------------   CallbackOutcome   ---------------------------------------------------------
/// The result of processing a decodable callback. All three are normal outcomes, not errors; only an
/// undecodable payload or a storage fault raises [`super::PaymentFlowError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The signature verified and the matching order is now `COMPLETE`.
    Completed { transaction_uuid: TransactionUuid },
    /// The signature verified, but no order matches the transaction uuid. Nothing was updated.
    UnknownTransaction { transaction_uuid: TransactionUuid },
    /// The signature did not verify against the payload's own declared field list. The order, if any,
    /// is untouched.
    VerificationFailed,
}
