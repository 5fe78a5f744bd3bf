//! Order Repository

use std::collections::HashMap;

use super::{RepoError, RepoResult, decimal_text};
use shared::error::ErrorCode;
use shared::models::{Order, OrderCreator, OrderDetail, OrderLine, OrderStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};
use rust_decimal::Decimal;

const ORDER_SELECT: &str = "SELECT o.id, o.order_number, o.status, o.total, o.table_number, o.customer_name, \
     o.notes, o.user_id, o.created_at, o.updated_at, u.name AS user_name \
     FROM orders o JOIN user u ON u.id = o.user_id";

const LINE_SELECT: &str = "SELECT oi.id, oi.order_id, oi.menu_item_id, oi.quantity, oi.price, oi.notes, \
     m.name AS menu_item_name \
     FROM order_item oi JOIN menu_item m ON m.id = oi.menu_item_id";

/// Header fields of a new order
pub struct NewOrder<'a> {
    pub user_id: i64,
    pub total: Decimal,
    pub table_number: Option<i64>,
    pub customer_name: Option<&'a str>,
    pub notes: Option<&'a str>,
}

/// Insert the order header; `order_number` is the next in sequence
///
/// Must run inside the creating transaction.
pub async fn insert_order(conn: &mut SqliteConnection, data: NewOrder<'_>) -> RepoResult<i64> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO orders (id, order_number, status, total, table_number, customer_name, notes, user_id, created_at, updated_at) \
         SELECT ?, COALESCE(MAX(order_number), 0) + 1, ?, ?, ?, ?, ?, ?, ?, ? FROM orders",
    )
    .bind(id)
    .bind(OrderStatus::Pending)
    .bind(decimal_text(data.total))
    .bind(data.table_number)
    .bind(data.customer_name)
    .bind(data.notes)
    .bind(data.user_id)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(id)
}

/// Insert one priced order line
pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    menu_item_id: i64,
    quantity: i64,
    price: Decimal,
    notes: Option<&str>,
) -> RepoResult<i64> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO order_item (id, order_id, menu_item_id, quantity, price, notes) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(order_id)
    .bind(menu_item_id)
    .bind(quantity)
    .bind(decimal_text(price))
    .bind(notes)
    .execute(&mut *conn)
    .await?;
    Ok(id)
}

fn order_from_row(row: &SqliteRow) -> Result<(Order, OrderCreator), sqlx::Error> {
    let order = Order::from_row(row)?;
    let creator = OrderCreator {
        id: order.user_id,
        name: row.try_get("user_name")?,
    };
    Ok((order, creator))
}

async fn lines_for<'e, E>(executor: E, order_ids: &[i64]) -> RepoResult<HashMap<i64, Vec<OrderLine>>>
where
    E: SqliteExecutor<'e>,
{
    let mut grouped: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    if order_ids.is_empty() {
        return Ok(grouped);
    }

    let mut qb = QueryBuilder::<Sqlite>::new(format!("{LINE_SELECT} WHERE oi.order_id IN ("));
    let mut separated = qb.separated(", ");
    for id in order_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY m.name, oi.id");

    let lines = qb.build_query_as::<OrderLine>().fetch_all(executor).await?;
    for line in lines {
        grouped.entry(line.item.order_id).or_default().push(line);
    }
    Ok(grouped)
}

/// All orders, newest first, with creator and lines
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OrderDetail>> {
    let rows = sqlx::query(&format!(
        "{ORDER_SELECT} ORDER BY o.created_at DESC, o.order_number DESC"
    ))
    .fetch_all(pool)
    .await?;

    let headers = rows
        .iter()
        .map(order_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    let ids: Vec<i64> = headers.iter().map(|(o, _)| o.id).collect();
    let mut lines = lines_for(pool, &ids).await?;

    Ok(headers
        .into_iter()
        .map(|(order, user)| OrderDetail {
            items: lines.remove(&order.id).unwrap_or_default(),
            order,
            user,
        })
        .collect())
}

/// One order with creator and lines
pub async fn find_detail(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<OrderDetail>> {
    let row = sqlx::query(&format!("{ORDER_SELECT} WHERE o.id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    let Some(row) = row else {
        return Ok(None);
    };

    let (order, user) = order_from_row(&row)?;
    let items = lines_for(&mut *conn, &[order.id])
        .await?
        .remove(&order.id)
        .unwrap_or_default();
    Ok(Some(OrderDetail { order, user, items }))
}

/// Order header only
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, order_number, status, total, table_number, customer_name, notes, user_id, created_at, updated_at \
         FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

/// Set status and notes, but only while the stored status is still `expected`
///
/// `None` notes keep the stored value. Returns `false` when the row exists but
/// its status moved on since it was read.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    expected: OrderStatus,
    status: OrderStatus,
    notes: Option<&str>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, notes = COALESCE(?2, notes), updated_at = ?3 \
         WHERE id = ?4 AND status = ?5",
    )
    .bind(status)
    .bind(notes)
    .bind(now_millis())
    .bind(id)
    .bind(expected)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete an order; its lines go with it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

pub(crate) fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::OrderNotFound, format!("Order {id} not found"))
}
