use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{CallbackPayload, Order, TransactionId},
    traits::OrderStore,
    tsp_api::{
        callback_verifier::{CallbackVerifier, VerificationResult},
        errors::CallbackError,
    },
    GatewayCredentials,
};

/// `CallbackApi` is the entry point for gateway callbacks. It runs the [`CallbackVerifier`] and turns its verdict
/// into either the newly persisted order, or a [`CallbackError`] describing the rejection.
pub struct CallbackApi<B> {
    verifier: CallbackVerifier,
    store: B,
}

impl<B> Debug for CallbackApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CallbackApi")
    }
}

impl<B> CallbackApi<B> {
    pub fn new(credentials: &GatewayCredentials, store: B) -> Self {
        Self { verifier: CallbackVerifier::new(credentials), store }
    }

    pub fn store(&self) -> &B {
        &self.store
    }
}

impl<B> CallbackApi<B>
where B: OrderStore
{
    /// Verifies a gateway callback and, if it is genuine, approved and new, records the order.
    ///
    /// Every outcome is returned to the caller; nothing is swallowed here.
    pub async fn handle(&self, payload: &CallbackPayload) -> Result<Order, CallbackError> {
        trace!("🧾️ Handling callback with {} fields", payload.len());
        let result = self.verifier.verify(payload, &self.store).await.map_err(|e| {
            error!("🧾️ Order store failure while verifying a callback. {e}");
            CallbackError::from(e)
        })?;
        match result {
            VerificationResult::Accepted(order) => Ok(order),
            VerificationResult::RejectedMalformed(field) => Err(CallbackError::MalformedRequest(field.to_string())),
            VerificationResult::RejectedHashMismatch(tid) => Err(CallbackError::HashMismatch(tid)),
            VerificationResult::RejectedUnauthorized { transaction_id, response_code } => {
                Err(CallbackError::Unauthorized { transaction_id, response_code: response_code.unwrap_or_default() })
            },
            VerificationResult::RejectedReplay(tid) => Err(CallbackError::Replay(tid)),
        }
    }

    pub async fn fetch_order(&self, transaction_id: &TransactionId) -> Result<Option<Order>, CallbackError> {
        let order = self.store.fetch_order(transaction_id).await?;
        Ok(order)
    }
}
