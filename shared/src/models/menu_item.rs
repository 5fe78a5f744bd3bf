//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Upper bound for a single menu price
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: Option<String>,
    pub is_available: bool,
    pub category_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Menu item with the owning category's name (list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemWithCategory {
    #[serde(flatten)]
    pub item: MenuItem,
    pub category_name: String,
}

#[cfg(feature = "db")]
impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for MenuItem {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: super::decimal_column(row, "price")?,
            image: row.try_get("image")?,
            is_available: row.try_get("is_available")?,
            category_id: row.try_get("category_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[cfg(feature = "db")]
impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for MenuItemWithCategory {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(Self {
            item: <MenuItem as sqlx::FromRow<'r, sqlx::sqlite::SqliteRow>>::from_row(row)?,
            category_name: row.try_get("category_name")?,
        })
    }
}

/// Price must be finite, non-negative and below [`MAX_PRICE`]
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price_negative")
            .with_message("Price must be greater than or equal to 0".into()));
    }
    if *price > MAX_PRICE {
        return Err(ValidationError::new("price_too_large")
            .with_message("Price exceeds the maximum allowed".into()));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200, message = "Item name is required"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(length(max = 2048, message = "Image URL is too long"))]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub category_id: i64,
}

/// Update menu item payload
///
/// Omitted fields are left unchanged; `description` and `image` are cleared
/// by an explicit `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 200, message = "Item name is required"))]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::serde_helpers::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<Option<String>>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "super::serde_helpers::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 2048, message = "Image URL is too long"))]
    pub image: Option<Option<String>>,
    pub is_available: Option<bool>,
    pub category_id: Option<i64>,
}

/// Public menu: a category with only its available items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub menu_items: Vec<MenuItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create(price: &str) -> MenuItemCreate {
        MenuItemCreate {
            name: "Garlic Bread".into(),
            description: None,
            price: Decimal::from_str(price).unwrap(),
            image: None,
            is_available: true,
            category_id: 1,
        }
    }

    #[test]
    fn test_price_bounds() {
        assert!(create("0").validate().is_ok());
        assert!(create("5.99").validate().is_ok());
        assert!(create("-0.01").validate().is_err());
        assert!(create("1000000.01").validate().is_err());
    }

    #[test]
    fn test_is_available_defaults_true() {
        let payload: MenuItemCreate =
            serde_json::from_str(r#"{"name":"Soda","price":2.99,"category_id":7}"#).unwrap();
        assert!(payload.is_available);
        assert_eq!(payload.price, Decimal::from_str("2.99").unwrap());
    }

    #[test]
    fn test_update_price_checked_when_present() {
        let payload = MenuItemUpdate {
            price: Some(Decimal::from_str("-1").unwrap()),
            ..Default::default()
        };
        assert!(payload.validate().is_err());
        assert!(MenuItemUpdate::default().validate().is_ok());
    }

    #[test]
    fn test_price_serializes_as_number() {
        let item = MenuItem {
            id: 1,
            name: "Coffee".into(),
            description: None,
            price: Decimal::from_str("3.99").unwrap(),
            image: None,
            is_available: true,
            category_id: 2,
            created_at: 0,
            updated_at: 0,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["price"], serde_json::json!(3.99));
    }
}
