use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Order, OrderId, OrderItem};

pub async fn fetch_order_by_id(id: OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(order)
}

/// Applies the `Pending → Completed` payment transition for the given order.
///
/// The update is conditional on the current payment status: a `Pending` order is completed, a `Completed` order is
/// rewritten in place (so a re-delivered payment event converges on the same row), and a `Failed` order is left
/// untouched, in which case `None` is returned. `None` is also returned when the order does not exist; callers
/// disambiguate with [`fetch_order_by_id`].
pub async fn mark_payment_completed(id: OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let updated: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders
            SET payment_status = 'Completed', updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND payment_status IN ('Pending', 'Completed')
            RETURNING *;
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    if let Some(order) = &updated {
        debug!("🗃️ Order {} payment status is now {}", order.id, order.payment_status);
    }
    Ok(updated)
}

pub async fn fetch_order_items(order_id: OrderId, conn: &mut SqliteConnection) -> Result<Vec<OrderItem>, sqlx::Error> {
    let items = sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id")
        .bind(order_id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}
