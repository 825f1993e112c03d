//! `SqliteOrderStore` is a concrete implementation of an order storage backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the [`OrderStore`] trait.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::{
    db::{new_pool, orders},
    SqliteDatabaseError,
};
use crate::{
    db_types::{NewOrder, Order, TransactionId},
    traits::{OrderStore, OrderStoreError},
};

#[derive(Clone)]
pub struct SqliteOrderStore {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteOrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteOrderStore ({:?})", self.pool)
    }
}

impl OrderStore for SqliteOrderStore {
    async fn exists(&self, transaction_id: &TransactionId) -> Result<bool, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let exists = orders::order_exists(transaction_id, &mut conn).await?;
        Ok(exists)
    }

    async fn insert(&self, order: NewOrder) -> Result<Order, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::insert_order(order, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_order(&self, transaction_id: &TransactionId) -> Result<Option<Order>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_transaction_id(transaction_id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderStoreError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_orders(&mut conn).await?;
        Ok(orders)
    }
}

impl SqliteOrderStore {
    /// Creates a new connection pool for `url`. The database file is created if it does not exist yet.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the schema up to date. Safe to call on every startup.
    pub async fn migrate(&self) -> Result<(), SqliteDatabaseError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("🗃️ Migrations complete for {}", self.url);
        Ok(())
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}
