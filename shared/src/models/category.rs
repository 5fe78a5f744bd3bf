//! Category Model

use super::menu_item::MenuItem;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Category together with its menu items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithItems {
    #[serde(flatten)]
    pub category: Category,
    pub menu_items: Vec<MenuItem>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryCreate {
    #[validate(length(min = 1, max = 200, message = "Category name is required"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
}

/// Update category payload
///
/// Omitted fields are left unchanged; `"description": null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryUpdate {
    #[validate(length(min = 1, max = 200, message = "Category name is required"))]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::serde_helpers::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        let payload = CategoryCreate {
            name: String::new(),
            description: None,
        };
        assert!(payload.validate().is_err());

        let payload = CategoryCreate {
            name: "Desserts".into(),
            description: Some("Sweet treats".into()),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_update_skips_absent_fields() {
        assert!(CategoryUpdate::default().validate().is_ok());
        let payload = CategoryUpdate {
            name: Some(String::new()),
            description: None,
        };
        assert!(payload.validate().is_err());

        let payload = CategoryUpdate {
            name: None,
            description: Some(Some("x".repeat(501))),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_update_null_description_means_clear() {
        let payload: CategoryUpdate = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(payload.description, Some(None));
        assert!(payload.validate().is_ok());

        let payload: CategoryUpdate = serde_json::from_str(r#"{"name": "Soups"}"#).unwrap();
        assert_eq!(payload.description, None);
    }
}
