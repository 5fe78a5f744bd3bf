//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Maximum allowed quantity per order line
pub const MAX_QUANTITY: i64 = 9999;

/// Order lifecycle status
///
/// ```text
/// PENDING -> PREPARING -> READY -> COMPLETED
///    |           |
///    +-----------+-----> CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// COMPLETED and CANCELLED accept no further moves
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether `self -> next` is a legal move. Staying put is always legal.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Preparing)
                | (Preparing, Ready)
                | (Ready, Completed)
                | (Pending, Cancelled)
                | (Preparing, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: i64,
    pub status: OrderStatus,
    /// Server-computed, never client-supplied
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub table_number: Option<i64>,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub user_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line; `price` is the menu price at order time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub notes: Option<String>,
}

/// Order line with the menu item name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(flatten)]
    pub item: OrderItem,
    pub menu_item_name: String,
}

/// Creator of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreator {
    pub id: i64,
    pub name: String,
}

/// Order with creator and lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub user: OrderCreator,
    pub items: Vec<OrderLine>,
}

#[cfg(feature = "db")]
impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for Order {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(Self {
            id: row.try_get("id")?,
            order_number: row.try_get("order_number")?,
            status: row.try_get("status")?,
            total: super::decimal_column(row, "total")?,
            table_number: row.try_get("table_number")?,
            customer_name: row.try_get("customer_name")?,
            notes: row.try_get("notes")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[cfg(feature = "db")]
impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for OrderItem {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(Self {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            menu_item_id: row.try_get("menu_item_id")?,
            quantity: row.try_get("quantity")?,
            price: super::decimal_column(row, "price")?,
            notes: row.try_get("notes")?,
        })
    }
}

#[cfg(feature = "db")]
impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for OrderLine {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(Self {
            item: <OrderItem as sqlx::FromRow<'r, sqlx::sqlite::SqliteRow>>::from_row(row)?,
            menu_item_name: row.try_get("menu_item_name")?,
        })
    }
}

/// One requested line of a new order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineInput {
    pub menu_item_id: i64,
    #[validate(range(min = 1, max = 9999, message = "Quantity must be a positive integer"))]
    pub quantity: i64,
    #[validate(length(max = 500, message = "Notes are too long"))]
    pub notes: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(range(min = 1, message = "Table number must be a positive integer"))]
    pub table_number: Option<i64>,
    #[validate(length(max = 200, message = "Customer name is too long"))]
    pub customer_name: Option<String>,
    #[validate(length(max = 500, message = "Notes are too long"))]
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "Order must have at least one item"), nested)]
    pub items: Vec<OrderLineInput>,
}

/// Update order payload
///
/// `status` is required; omitted `notes` keep the stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderUpdate {
    pub status: OrderStatus,
    #[validate(length(max = 500, message = "Notes are too long"))]
    pub notes: Option<String>,
}
