use std::{fmt::Display, str::FromStr};

use epg_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------   TransactionUuid   ---------------------------------------------------------
/// The caller-supplied identifier that correlates a checkout initiation with its eventual callback.
///
/// eSewa echoes this value back in the callback payload, and it is the key used to transition the order,
/// so it is restricted to URL- and HTML-safe characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct TransactionUuid(pub String);

impl TransactionUuid {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A transaction uuid must be non-empty and may only contain alphanumerics, `-` and `_`.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl FromStr for TransactionUuid {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for TransactionUuid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for TransactionUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------     OrderStatus     ---------------------------------------------------------
/// Order lifecycle states. `Pending --(verified callback)--> Complete` is the only transition; there is no
/// terminal failure state — a failed or cancelled payment simply never moves the order out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// The order has been created and the signed payment form has been handed to the payer.
    Pending,
    /// A callback with a valid signature has been received for the order.
    Complete,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Complete => write!(f, "COMPLETE"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "COMPLETE" => Ok(Self::Complete),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: i64,
    pub transaction_uuid: TransactionUuid,
    pub product_code: String,
    pub total_amount: Money,
    pub status: OrderStatus,
}

//--------------------------------------       NewOrder      ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// The transaction uuid supplied by the caller at checkout
    pub transaction_uuid: TransactionUuid,
    /// The merchant product code the payment is made against
    pub product_code: String,
    /// The total amount, computed once by the orchestrator. The store never recomputes it.
    pub total_amount: Money,
}

impl NewOrder {
    pub fn new(transaction_uuid: TransactionUuid, product_code: String, total_amount: Money) -> Self {
        Self { transaction_uuid, product_code, total_amount }
    }
}

//--------------------------------------       Product       ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Money,
    pub description: String,
}

//--------------------------------------      NewProduct     ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub description: String,
}

impl NewProduct {
    pub fn new(name: &str, price: Money, description: &str) -> Self {
        Self { name: name.to_string(), price, description: description.to_string() }
    }
}
