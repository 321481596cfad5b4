//! # Payment request signature format
//!
//! eSewa authenticates both directions of the redirect flow with the same scheme: a keyed hash over an
//! ordered list of named fields, using a secret shared between the merchant and the gateway.
//!
//! ## Message format
//!
//! The message is the comma-joined `key=value` rendering of the fields, in the exact order given:
//!
//! ```text
//!     total_amount=110,transaction_uuid=240613-001,product_code=EPAYTEST
//! ```
//!
//! For outbound payment requests the merchant signs the canonical field order
//! `(total_amount, transaction_uuid, product_code)` and declares it in the form's `signed_field_names`
//! field. For inbound callbacks the *sender's* declared order is authoritative — the callback carries its
//! own `signed_field_names` list, and the verifier must reconstruct the message in that order, since the
//! field list is itself part of the signed data contract.
//!
//! The signature is the base64 encoding of `HMAC-SHA256(secret, message)`.
//!
//! Verification recomputes the MAC and compares in constant time. These functions hold no state and are
//! safe to call from any number of threads.

use epg_common::Secret;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Renders the ordered field list as the exact byte string that gets signed.
pub fn signature_message(fields: &[(&str, &str)]) -> String {
    fields.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join(",")
}

/// Signs the ordered field list with the shared secret, returning the base64 signature text.
pub fn sign_fields(secret: &Secret<String>, fields: &[(&str, &str)]) -> String {
    let mac = mac_for(secret, fields);
    base64::encode(mac.finalize().into_bytes())
}

/// Checks `candidate` against the signature of the ordered field list. An undecodable candidate is simply
/// an invalid signature, never an error. The comparison is constant-time.
pub fn verify_fields(secret: &Secret<String>, fields: &[(&str, &str)], candidate: &str) -> bool {
    let Ok(sig) = base64::decode(candidate) else {
        return false;
    };
    mac_for(secret, fields).verify_slice(&sig).is_ok()
}

fn mac_for(secret: &Secret<String>, fields: &[(&str, &str)]) -> HmacSha256 {
    // HMAC accepts keys of any length, so this cannot fail
    let mut mac = HmacSha256::new_from_slice(secret.reveal().as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(signature_message(fields).as_bytes());
    mac
}
