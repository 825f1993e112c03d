//! # Storage backends
//!
//! The [`OrderStore`] trait is the contract a storage backend must fulfil to hold the store's completed orders.
//! Two backends ship with the engine:
//!
//! * [`crate::SqliteOrderStore`], which relies on a `UNIQUE` constraint on the transaction id column, and
//! * [`crate::MemoryOrderStore`], which checks and writes under a single write lock.
mod order_store;

pub use order_store::{OrderStore, OrderStoreError};
