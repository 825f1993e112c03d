//! # Callback integrity hash
//!
//! The gateway attaches `x_MD5_Hash` to every callback so the receiver can confirm the outcome was not altered in
//! transit. It is a plain (unkeyed) MD5 over
//!
//! ```text
//!    {response_key}{login}{transaction_id}{amount}
//! ```
//!
//! with no separators. The shared response key at the front is what makes the hash unforgeable. The amount is the
//! `x_amount` text exactly as received; it is never re-formatted before hashing.
use md5::{Digest, Md5};
use subtle::ConstantTimeEq;
use tsp_common::Secret;

pub fn integrity_message(response_key: &Secret<String>, login: &str, transaction_id: &str, amount: &str) -> String {
    format!("{}{login}{transaction_id}{amount}", response_key.reveal())
}

/// Lower-case hex MD5 digest of the integrity message.
pub fn integrity_hash(response_key: &Secret<String>, login: &str, transaction_id: &str, amount: &str) -> String {
    let message = integrity_message(response_key, login, transaction_id, amount);
    hex::encode(Md5::digest(message.as_bytes()))
}

/// Exact, constant-time comparison of the expected hash against the one the gateway sent.
pub fn hashes_match(expected: &str, supplied: &str) -> bool {
    expected.as_bytes().ct_eq(supplied.as_bytes()).into()
}
