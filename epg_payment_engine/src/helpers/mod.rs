pub mod payment_signature;

pub use payment_signature::{sign_fields, signature_message, verify_fields};
