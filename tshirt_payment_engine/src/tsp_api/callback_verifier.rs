//! # Callback verification
//!
//! Every callback passes through three ordered stages. Each stage's failure is terminal, so later stages never see a
//! callback an earlier stage rejected.
//!
//! 1. **Hash integrity.** The transaction id and amount must be present, otherwise the callback is malformed. The
//!    gateway's `x_MD5_Hash` must then equal `md5(response_key + login + transaction_id + amount)`. A forged callback
//!    fails here, before its claimed outcome is even looked at.
//! 2. **Authorization outcome.** Only response code `1` (approved) proceeds. A declined callback still carries a valid
//!    hash: it is genuine, just not paid.
//! 3. **Replay detection.** The transaction id must not already have an order. The final insert is atomic, so two
//!    concurrent callbacks for one transaction can never both be accepted.
use log::*;
use tsp_common::Secret;

use crate::{
    db_types::{CallbackPayload, NewOrder, Order, TransactionId},
    gge4,
    helpers::{hashes_match, integrity_hash},
    traits::{OrderStore, OrderStoreError},
    GatewayCredentials,
};

/// The verdict on a single callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// The callback passed every stage and this order was persisted.
    Accepted(Order),
    /// A field needed for the hash check (named here) was missing or empty.
    RejectedMalformed(&'static str),
    /// The integrity hash did not match. The callback is forged or was altered.
    RejectedHashMismatch(TransactionId),
    /// The callback is genuine but the payment was not approved.
    RejectedUnauthorized { transaction_id: TransactionId, response_code: Option<String> },
    /// An order already exists for this transaction.
    RejectedReplay(TransactionId),
}

impl VerificationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

#[derive(Clone, Debug)]
pub struct CallbackVerifier {
    login: String,
    response_key: Secret<String>,
}

impl CallbackVerifier {
    pub fn new(credentials: &GatewayCredentials) -> Self {
        Self { login: credentials.login().to_string(), response_key: credentials.response_key().clone() }
    }

    /// Runs all three stages against `payload`, persisting an order into `store` if they all pass.
    ///
    /// Rejections are `Ok` values. An `Err` means the store itself failed and nothing can be said about the callback.
    pub async fn verify<B: OrderStore>(
        &self,
        payload: &CallbackPayload,
        store: &B,
    ) -> Result<VerificationResult, OrderStoreError> {
        let transaction_id = match self.check_hash(payload) {
            Ok(tid) => tid,
            Err(rejection) => return Ok(rejection),
        };
        if let Err(rejection) = check_response_code(payload, &transaction_id) {
            return Ok(rejection);
        }
        record_order(transaction_id, payload, store).await
    }

    /// Stage 1. Returns the transaction id if the integrity hash checks out.
    pub fn check_hash(&self, payload: &CallbackPayload) -> Result<TransactionId, VerificationResult> {
        let transaction_id = payload.non_empty(gge4::TRANSACTION_ID).ok_or_else(|| {
            debug!("🧾️ Callback has no {}. Rejecting as malformed.", gge4::TRANSACTION_ID);
            VerificationResult::RejectedMalformed(gge4::TRANSACTION_ID)
        })?;
        let amount = payload.non_empty(gge4::AMOUNT).ok_or_else(|| {
            debug!("🧾️ Callback for {transaction_id} has no {}. Rejecting as malformed.", gge4::AMOUNT);
            VerificationResult::RejectedMalformed(gge4::AMOUNT)
        })?;
        let expected = integrity_hash(&self.response_key, &self.login, transaction_id, amount);
        let supplied = payload.get(gge4::MD5_HASH).unwrap_or_default();
        if hashes_match(&expected, supplied) {
            trace!("🧾️ Integrity hash for transaction {transaction_id} ✅️");
            Ok(TransactionId::from(transaction_id))
        } else {
            warn!(
                "🧾️🚨️ Integrity hash mismatch for transaction {transaction_id} (amount {amount}). The callback was \
                 forged or altered in transit."
            );
            Err(VerificationResult::RejectedHashMismatch(TransactionId::from(transaction_id)))
        }
    }
}

/// Stage 2. Only an approved response code may proceed.
fn check_response_code(payload: &CallbackPayload, transaction_id: &TransactionId) -> Result<(), VerificationResult> {
    match payload.get(gge4::RESPONSE_CODE) {
        Some(gge4::RESPONSE_APPROVED) => Ok(()),
        code => {
            info!("🧾️ Transaction {transaction_id} was not approved. Response code: {}", code.unwrap_or("<none>"));
            Err(VerificationResult::RejectedUnauthorized {
                transaction_id: transaction_id.clone(),
                response_code: code.map(String::from),
            })
        },
    }
}

/// Stage 3. Rejects replays and persists the order otherwise.
async fn record_order<B: OrderStore>(
    transaction_id: TransactionId,
    payload: &CallbackPayload,
    store: &B,
) -> Result<VerificationResult, OrderStoreError> {
    if store.exists(&transaction_id).await? {
        warn!("🧾️🔁️ Transaction {transaction_id} already has an order. Rejecting replayed callback.");
        return Ok(VerificationResult::RejectedReplay(transaction_id));
    }
    let order = NewOrder::from_callback(transaction_id, payload);
    match store.insert(order).await {
        Ok(order) => {
            info!("🧾️ Order #{} created for transaction {}", order.id, order.transaction_id);
            Ok(VerificationResult::Accepted(order))
        },
        Err(OrderStoreError::DuplicateKey(tid)) => {
            warn!("🧾️🔁️ Transaction {tid} was recorded by a concurrent callback. Rejecting this one as a replay.");
            Ok(VerificationResult::RejectedReplay(tid))
        },
        Err(e) => Err(e),
    }
}
