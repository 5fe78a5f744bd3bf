//! First-start seed data
//!
//! Default staff accounts are created when the `user` table is empty.
//! The sample menu is written only when enabled and no category exists yet.

use std::str::FromStr;

use rust_decimal::Decimal;
use shared::models::{CategoryCreate, MenuItemCreate, Role};
use sqlx::SqlitePool;

use super::repository::{RepoError, RepoResult, category, menu_item, user};
use crate::auth::hash_password;

/// (name, email, password, role)
const DEFAULT_USERS: &[(&str, &str, &str, Role)] = &[
    ("Admin User", "admin@restaurant.com", "admin123", Role::Admin),
    ("Manager User", "manager@restaurant.com", "manager123", Role::Manager),
    ("Staff User", "staff@restaurant.com", "staff123", Role::Staff),
];

/// (name, description)
const SAMPLE_CATEGORIES: &[(&str, &str)] = &[
    ("Appetizers", "Start your meal with these delicious options"),
    ("Main Courses", "Hearty and satisfying main dishes"),
    ("Desserts", "Sweet treats to finish your meal"),
    ("Beverages", "Refreshing drinks to complement your food"),
];

/// (category, name, description, price)
const SAMPLE_ITEMS: &[(&str, &str, &str, &str)] = &[
    ("Appetizers", "Garlic Bread", "Toasted bread with garlic butter and herbs", "5.99"),
    ("Appetizers", "Mozzarella Sticks", "Breaded and fried mozzarella with marinara sauce", "7.99"),
    ("Appetizers", "Chicken Wings", "Crispy wings with your choice of sauce", "9.99"),
    ("Main Courses", "Classic Burger", "Beef patty with lettuce, tomato, and special sauce", "12.99"),
    ("Main Courses", "Margherita Pizza", "Traditional pizza with tomato sauce, mozzarella, and basil", "14.99"),
    ("Main Courses", "Grilled Salmon", "Fresh salmon fillet with lemon butter sauce", "18.99"),
    ("Desserts", "Chocolate Cake", "Rich chocolate cake with ganache", "6.99"),
    ("Desserts", "Cheesecake", "Creamy New York style cheesecake", "7.99"),
    ("Beverages", "Soda", "Assorted soft drinks", "2.99"),
    ("Beverages", "Iced Tea", "Freshly brewed iced tea", "3.49"),
    ("Beverages", "Coffee", "Freshly brewed coffee", "3.99"),
];

/// Seed default users (and optionally the sample menu)
pub async fn seed_if_empty(pool: &SqlitePool, with_menu: bool) -> RepoResult<()> {
    if user::count(pool).await? == 0 {
        seed_users(pool).await?;
    }
    if with_menu && category::find_all(pool).await?.is_empty() {
        seed_menu(pool).await?;
    }
    Ok(())
}

async fn seed_users(pool: &SqlitePool) -> RepoResult<()> {
    for (name, email, password, role) in DEFAULT_USERS {
        let hash = hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash seed password: {e}")))?;
        user::create(pool, name, email, &hash, *role).await?;
        tracing::info!(email = %email, role = %role, "Seeded default user");
    }
    tracing::warn!("Default accounts use well-known passwords, change them before production use");
    Ok(())
}

async fn seed_menu(pool: &SqlitePool) -> RepoResult<()> {
    let mut category_ids = Vec::with_capacity(SAMPLE_CATEGORIES.len());
    for (name, description) in SAMPLE_CATEGORIES {
        let created = category::create(
            pool,
            CategoryCreate {
                name: name.to_string(),
                description: Some(description.to_string()),
            },
        )
        .await?;
        category_ids.push((*name, created.id));
    }

    for (category_name, name, description, price) in SAMPLE_ITEMS {
        let Some((_, category_id)) = category_ids.iter().find(|(n, _)| n == category_name) else {
            continue;
        };
        let price = Decimal::from_str(price)
            .map_err(|e| RepoError::Validation(format!("Invalid seed price {price}: {e}")))?;
        menu_item::create(
            pool,
            MenuItemCreate {
                name: name.to_string(),
                description: Some(description.to_string()),
                price,
                image: None,
                is_available: true,
                category_id: *category_id,
            },
        )
        .await?;
    }

    tracing::info!(
        categories = SAMPLE_CATEGORIES.len(),
        items = SAMPLE_ITEMS.len(),
        "Seeded sample menu"
    );
    Ok(())
}
