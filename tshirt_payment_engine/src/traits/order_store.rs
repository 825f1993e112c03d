use thiserror::Error;

use crate::db_types::{NewOrder, Order, TransactionId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderStoreError {
    #[error("An order for transaction {0} already exists")]
    DuplicateKey(TransactionId),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Durable, uniquely keyed storage for completed orders.
///
/// Orders are keyed on their gateway transaction id. There is no update or delete path: an order is written once and
/// read many times.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Whether an order for `transaction_id` has already been stored.
    ///
    /// This is a cheap pre-check only. Between this call and a subsequent [`Self::insert`] another caller may write
    /// the same key, so callers must still handle [`OrderStoreError::DuplicateKey`] from `insert`.
    async fn exists(&self, transaction_id: &TransactionId) -> Result<bool, OrderStoreError>;

    /// Stores a new order and returns the persisted record.
    ///
    /// Implementations must perform the uniqueness check and the write atomically. Of any number of concurrent inserts
    /// with the same transaction id, exactly one succeeds and every other one returns
    /// [`OrderStoreError::DuplicateKey`].
    async fn insert(&self, order: NewOrder) -> Result<Order, OrderStoreError>;

    /// Fetches the order for `transaction_id`, if there is one.
    async fn fetch_order(&self, transaction_id: &TransactionId) -> Result<Option<Order>, OrderStoreError>;

    /// Fetches every stored order, oldest first.
    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderStoreError>;
}
