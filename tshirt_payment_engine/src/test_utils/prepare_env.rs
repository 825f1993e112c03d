use log::*;
use tempfile::TempDir;

use crate::SqliteOrderStore;

/// Creates a fresh, migrated SQLite order store in a temporary directory.
///
/// The database lives as long as the returned `TempDir`, so keep it in scope for the duration of the test.
pub async fn prepare_test_db() -> (TempDir, SqliteOrderStore) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().expect("Error creating temporary directory");
    let url = format!("sqlite://{}", dir.path().join("test_orders.db").display());
    let store = SqliteOrderStore::new_with_url(&url, 5).await.expect("Error creating database");
    store.migrate().await.expect("Error running DB migrations");
    debug!("🚀️ Test database ready at {url}");
    (dir, store)
}
