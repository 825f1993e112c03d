//! T-shirt Payment Engine
//!
//! The engine holds the part of the T-shirt store that decides whether money has really changed hands. It knows
//! nothing about HTTP or HTML; the server crate wraps it.
//!
//! The library is divided into these sections:
//! 1. Outbound request signing ([`helpers::Signer`]). Before the customer is sent to the gateway's hosted payment page,
//!    the form fields are fingerprinted with the shared transaction key.
//! 2. Callback verification ([`tsp_api`]). When the gateway sends the customer back, [`CallbackApi::handle`] checks
//!    the integrity hash, the authorization outcome and that the transaction has not been used before, in that order.
//! 3. Order storage ([`OrderStore`]). Orders are keyed by gateway transaction id and written exactly once. SQLite and
//!    in-memory backends are provided.
mod credentials;
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub mod db_types;
pub mod gge4;
pub mod helpers;
pub mod traits;
pub mod tsp_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use credentials::{ConfigurationError, GatewayCredentials};
pub use db_types::{CallbackPayload, NewOrder, Order, TransactionId};
pub use memory::MemoryOrderStore;
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteDatabaseError, SqliteOrderStore};
pub use traits::{OrderStore, OrderStoreError};
pub use tsp_api::{
    callback_api::CallbackApi,
    callback_verifier::{CallbackVerifier, VerificationResult},
    errors::CallbackError,
};
