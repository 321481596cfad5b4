use thiserror::Error;

use crate::traits::ShopDatabaseError;

#[derive(Debug, Error)]
pub enum PaymentFlowError {
    /// The checkout request is missing or malformed. Maps to a 400 at the HTTP boundary.
    #[error("Invalid checkout request. {0}")]
    InvalidRequest(String),
    /// The callback payload could not be decoded into a callback record. Maps to a 400.
    ///
    /// Note that a *well-formed* payload with a bad signature is not an error — that is
    /// [`super::CallbackOutcome::VerificationFailed`], an expected business outcome.
    #[error("Could not decode callback payload. {0}")]
    BadPayload(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] ShopDatabaseError),
}
