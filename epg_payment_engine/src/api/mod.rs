mod catalog_api;
mod errors;
mod payment_flow_api;
mod payment_objects;

pub use catalog_api::CatalogApi;
pub use errors::PaymentFlowError;
pub use payment_flow_api::{PaymentFlowApi, DEFAULT_PRODUCT_CODE, SIGNED_FIELD_NAMES};
pub use payment_objects::{CallbackOutcome, CallbackPayload, CheckoutRequest, PaymentInit};
