use thiserror::Error;

use crate::{db_types::TransactionId, traits::OrderStoreError};

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Database migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("Could not (de)serialize order fields: {0}")]
    FieldsError(#[from] serde_json::Error),
    #[error("Cannot process duplicate order for transaction {0}")]
    DuplicateOrder(TransactionId),
}

impl From<SqliteDatabaseError> for OrderStoreError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::DuplicateOrder(tid) => OrderStoreError::DuplicateKey(tid),
            e => OrderStoreError::DatabaseError(e.to_string()),
        }
    }
}

impl From<sqlx::Error> for OrderStoreError {
    fn from(e: sqlx::Error) -> Self {
        SqliteDatabaseError::from(e).into()
    }
}
