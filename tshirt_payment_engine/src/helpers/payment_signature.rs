//! # Outbound payment request signatures
//!
//! Before the customer's browser is sent to the gateway's hosted payment page, the form fields are fingerprinted so
//! that the gateway can tell the request really came from us and that nobody changed the price on the way.
//!
//! ## Message format
//!
//! ```text
//!    {login}^{sequence}^{timestamp}^{amount}^
//! ```
//!
//! where
//!   * `login` is the gateway login id (`x_login`),
//!   * `sequence` is a random integer in `[10000, 100000)` (`x_fp_sequence`). It acts like a salt, so the fingerprint
//!     cannot be predicted from the amount alone,
//!   * `timestamp` is the signing time in whole seconds since the Unix epoch, truncated (`x_fp_timestamp`),
//!   * `amount` is the canonical amount text (`x_amount`).
//!
//! The trailing `^` is part of the message. The fingerprint (`x_fp_hash`) is the lower-case hex HMAC-MD5 of the
//! message, keyed with the gateway transaction key. Reordering or reformatting any field breaks every signature.
use std::ops::Range;

use hmac::{Hmac, Mac};
use log::trace;
use md5::Md5;
use rand::Rng;
use serde::Serialize;
use subtle::ConstantTimeEq;
use tsp_common::{Amount, Secret};

use crate::{credentials::ConfigurationError, helpers::clock::Clock, GatewayCredentials};

type HmacMd5 = Hmac<Md5>;

/// Sequence numbers are drawn uniformly from this range.
pub const SEQUENCE_RANGE: Range<u32> = 10_000..100_000;

/// The signed fields of an outbound payment form. Serializes with the gateway's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedPaymentRequest {
    #[serde(rename = "x_login")]
    pub login: String,
    #[serde(rename = "x_fp_sequence")]
    pub sequence: u32,
    #[serde(rename = "x_fp_timestamp")]
    pub timestamp: i64,
    #[serde(rename = "x_amount")]
    pub amount: Amount,
    #[serde(rename = "x_fp_hash")]
    pub signature: String,
}

impl SignedPaymentRequest {
    pub fn message(&self) -> String {
        signature_message(&self.login, self.sequence, self.timestamp, &self.amount)
    }

    /// Recomputes the fingerprint with `key` and compares it to the one carried in the request.
    pub fn has_valid_signature(&self, key: &Secret<String>) -> bool {
        let expected = keyed_signature(key, &self.message());
        expected.as_bytes().ct_eq(self.signature.as_bytes()).into()
    }
}

/// Signs payment requests with a fixed set of gateway credentials.
#[derive(Clone, Debug)]
pub struct Signer {
    login: String,
    transaction_key: Secret<String>,
}

impl Signer {
    pub fn new(credentials: &GatewayCredentials) -> Self {
        Self { login: credentials.login().to_string(), transaction_key: credentials.transaction_key().clone() }
    }

    pub fn sign<C, R>(&self, amount: &Amount, clock: &C, rng: &mut R) -> SignedPaymentRequest
    where
        C: Clock + ?Sized,
        R: Rng + ?Sized,
    {
        let sequence = rng.gen_range(SEQUENCE_RANGE);
        let timestamp = clock.now().timestamp();
        let message = signature_message(&self.login, sequence, timestamp, amount);
        let signature = keyed_signature(&self.transaction_key, &message);
        trace!("🖋️ Signed payment request #{sequence} for {amount} at {timestamp}");
        SignedPaymentRequest { login: self.login.clone(), sequence, timestamp, amount: amount.clone(), signature }
    }
}

/// Signs a single payment request.
///
/// Fails with a [`ConfigurationError`] if the login id or the transaction key is empty, since a request signed with
/// an absent key must never reach a customer.
pub fn sign_payment_request<C, R>(
    login: &str,
    amount: &Amount,
    transaction_key: &Secret<String>,
    clock: &C,
    rng: &mut R,
) -> Result<SignedPaymentRequest, ConfigurationError>
where
    C: Clock + ?Sized,
    R: Rng + ?Sized,
{
    if login.is_empty() {
        return Err(ConfigurationError::MissingValue("login id"));
    }
    if transaction_key.is_empty() {
        return Err(ConfigurationError::MissingValue("transaction key"));
    }
    let signer = Signer { login: login.to_string(), transaction_key: transaction_key.clone() };
    Ok(signer.sign(amount, clock, rng))
}

pub fn signature_message(login: &str, sequence: u32, timestamp: i64, amount: &Amount) -> String {
    format!("{login}^{sequence}^{timestamp}^{amount}^")
}

/// Lower-case hex HMAC-MD5 of `message`.
pub fn keyed_signature(key: &Secret<String>, message: &str) -> String {
    let mut mac = HmacMd5::new_from_slice(key.reveal().as_bytes()).expect("HMAC accepts any key");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
