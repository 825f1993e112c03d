use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use log::*;
use tokio::sync::RwLock;

use crate::{
    db_types::{NewOrder, Order, TransactionId},
    traits::{OrderStore, OrderStoreError},
};

/// A thread-safe in-memory order store.
///
/// Clones share the same underlying map, so one instance can be handed to every server worker. Nothing survives a
/// restart, which makes this backend suitable for tests and demos only.
#[derive(Debug, Default, Clone)]
pub struct MemoryOrderStore {
    orders: Arc<RwLock<HashMap<TransactionId, Order>>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for MemoryOrderStore {
    async fn exists(&self, transaction_id: &TransactionId) -> Result<bool, OrderStoreError> {
        let orders = self.orders.read().await;
        Ok(orders.contains_key(transaction_id))
    }

    async fn insert(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
        // The write guard is held across the check and the insert
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.transaction_id) {
            debug!("🗃️ Transaction {} is already in the order store", order.transaction_id);
            return Err(OrderStoreError::DuplicateKey(order.transaction_id));
        }
        #[allow(clippy::cast_possible_wrap)]
        let id = orders.len() as i64 + 1;
        let order = Order::from_new_order(id, order, Utc::now());
        orders.insert(order.transaction_id.clone(), order.clone());
        debug!("🗃️ Order #{id} saved for transaction {}", order.transaction_id);
        Ok(order)
    }

    async fn fetch_order(&self, transaction_id: &TransactionId) -> Result<Option<Order>, OrderStoreError> {
        let orders = self.orders.read().await;
        Ok(orders.get(transaction_id).cloned())
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderStoreError> {
        let orders = self.orders.read().await;
        let mut result = orders.values().cloned().collect::<Vec<_>>();
        result.sort_by_key(|o| o.id);
        Ok(result)
    }
}
