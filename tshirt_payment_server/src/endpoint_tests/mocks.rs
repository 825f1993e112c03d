use mockall::mock;
use tshirt_payment_engine::{NewOrder, Order, OrderStore, OrderStoreError, TransactionId};

mock! {
    pub Store {}
    impl OrderStore for Store {
        async fn exists(&self, transaction_id: &TransactionId) -> Result<bool, OrderStoreError>;
        async fn insert(&self, order: NewOrder) -> Result<Order, OrderStoreError>;
        async fn fetch_order(&self, transaction_id: &TransactionId) -> Result<Option<Order>, OrderStoreError>;
        async fn fetch_orders(&self) -> Result<Vec<Order>, OrderStoreError>;
    }
}
