//! SQLite database module for the T-shirt payment engine.
mod errors;
mod sqlite_impl;

pub mod db;
pub use errors::SqliteDatabaseError;
pub use sqlite_impl::SqliteOrderStore;
