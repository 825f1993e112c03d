use thiserror::Error;

use crate::{db_types::TransactionId, traits::OrderStoreError};

/// Why a callback did not produce an order. Every rejection class is kept distinct: a forged callback must never be
/// reported as a merely declined one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallbackError {
    #[error("The callback is missing the required field {0}.")]
    MalformedRequest(String),
    #[error("The integrity hash for transaction {0} is invalid.")]
    HashMismatch(TransactionId),
    #[error("Transaction {transaction_id} was not approved (response code {response_code}).")]
    Unauthorized { transaction_id: TransactionId, response_code: String },
    #[error("Transaction {0} has already been used for an order.")]
    Replay(TransactionId),
    #[error("Could not access the order store. {0}")]
    StoreError(String),
}

impl From<OrderStoreError> for CallbackError {
    fn from(e: OrderStoreError) -> Self {
        match e {
            OrderStoreError::DuplicateKey(tid) => Self::Replay(tid),
            OrderStoreError::DatabaseError(s) => Self::StoreError(s),
        }
    }
}
