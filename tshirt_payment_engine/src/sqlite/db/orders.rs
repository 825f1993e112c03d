use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::{debug, trace};
use sqlx::{FromRow, SqliteConnection};

use crate::{
    db_types::{NewOrder, Order, TransactionId},
    sqlite::SqliteDatabaseError,
};

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    transaction_id: String,
    amount: String,
    response_code: String,
    fields: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = SqliteDatabaseError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let fields = serde_json::from_str::<BTreeMap<String, String>>(&row.fields)?;
        Ok(Order {
            id: row.id,
            transaction_id: TransactionId(row.transaction_id),
            amount: row.amount,
            response_code: row.response_code,
            fields,
            created_at: row.created_at,
        })
    }
}

/// Inserts a new order into the database using the given connection.
///
/// The `UNIQUE` constraint on `transaction_id` makes the insert itself the uniqueness check, so this is safe to call
/// from concurrent connections: the losers receive [`SqliteDatabaseError::DuplicateOrder`].
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, SqliteDatabaseError> {
    let fields = serde_json::to_string(&order.fields)?;
    let created_at = Utc::now();
    let result = sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO orders (
                transaction_id,
                amount,
                response_code,
                fields,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING id;
        "#,
    )
    .bind(order.transaction_id.as_str())
    .bind(order.amount.as_str())
    .bind(order.response_code.as_str())
    .bind(fields)
    .bind(created_at)
    .fetch_one(conn)
    .await;
    match result {
        Ok(id) => {
            debug!("🗃️ Order #{id} inserted for transaction {}", order.transaction_id);
            Ok(Order::from_new_order(id, order, created_at))
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            debug!("🗃️ Transaction {} is already in the orders table", order.transaction_id);
            Err(SqliteDatabaseError::DuplicateOrder(order.transaction_id))
        },
        Err(e) => Err(e.into()),
    }
}

/// Returns the order for the corresponding `transaction_id`
pub async fn fetch_order_by_transaction_id(
    transaction_id: &TransactionId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, SqliteDatabaseError> {
    let row = sqlx::query_as::<_, OrderRow>(
        r#"
            SELECT id, transaction_id, amount, response_code, fields, created_at
            FROM orders
            WHERE transaction_id = $1;
        "#,
    )
    .bind(transaction_id.as_str())
    .fetch_optional(conn)
    .await?;
    row.map(Order::try_from).transpose()
}

/// Checks whether an order with the given `TransactionId` already exists in the database.
pub async fn order_exists(
    transaction_id: &TransactionId,
    conn: &mut SqliteConnection,
) -> Result<bool, SqliteDatabaseError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE transaction_id = $1")
        .bind(transaction_id.as_str())
        .fetch_one(conn)
        .await?;
    trace!("🗃️ {count} orders found for transaction {transaction_id}");
    Ok(count > 0)
}

/// Fetches all orders, ordered by `id` in ascending order
pub async fn fetch_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, SqliteDatabaseError> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT id, transaction_id, amount, response_code, fields, created_at FROM orders ORDER BY id ASC",
    )
    .fetch_all(conn)
    .await?;
    rows.into_iter().map(Order::try_from).collect()
}
