//! Data models
//!
//! Shared between pos-server and API clients.
//! DB row types implement `sqlx::FromRow` when the `db` feature is enabled.
//! All IDs are `i64` snowflakes, timestamps are UTC epoch milliseconds.

pub mod category;
pub mod menu_item;
pub mod order;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use order::*;
pub use user::*;

/// Decode a decimal column stored as TEXT
///
/// SQLite has no decimal type and sqlx has no SQLite `Decimal` codec,
/// so money columns are written with `Decimal::to_string()` and parsed back here.
#[cfg(feature = "db")]
pub(crate) fn decimal_column(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<rust_decimal::Decimal, sqlx::Error> {
    use sqlx::Row;
    use std::str::FromStr;

    let raw: String = row.try_get(column)?;
    rust_decimal::Decimal::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
