//! # T-shirt payment engine public API
//!
//! * [`callback_verifier`] holds the three-stage trust check for gateway callbacks.
//! * [`callback_api`] wraps the verifier and an [`crate::OrderStore`] backend into the single `handle` entry point the
//!   server calls for each callback.
//!
//! # API usage
//!
//! An API instance is created by supplying the gateway credentials and a storage backend:
//!
//! ```rust,ignore
//! use tshirt_payment_engine::{CallbackApi, CallbackPayload, GatewayCredentials, SqliteOrderStore};
//! let store = SqliteOrderStore::new_with_url(...).await?;
//! let api = CallbackApi::new(&credentials, store);
//! let order = api.handle(&CallbackPayload::from_pairs(query_params)).await?;
//! ```
pub mod callback_api;
pub mod callback_verifier;
pub mod errors;
