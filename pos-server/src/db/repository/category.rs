//! Category Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, created_at, updated_at FROM category ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, created_at, updated_at FROM category WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM category WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found > 0)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO category (id, name, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

/// Partial update; omitted fields keep their stored value, a `null` description clears it
pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let rows = sqlx::query(
        "UPDATE category SET \
            name = COALESCE(?1, name), \
            description = CASE WHEN ?2 THEN ?3 ELSE description END, \
            updated_at = ?4 \
         WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(data.description.is_some())
    .bind(data.description.as_ref().and_then(|d| d.as_deref()))
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Delete a category that owns no menu items
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    if !exists(pool, id).await? {
        return Err(not_found(id));
    }

    let item_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_item WHERE category_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if item_count > 0 {
        return Err(RepoError::Business(
            ErrorCode::CategoryHasMenuItems,
            format!("Cannot delete category with {item_count} menu item(s)"),
        ));
    }

    sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| match RepoError::from(e) {
            // an item was added between the count and the delete
            RepoError::ForeignKey(_) => RepoError::Business(
                ErrorCode::CategoryHasMenuItems,
                "Cannot delete category with menu items".into(),
            ),
            other => other,
        })?;
    Ok(())
}

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::CategoryNotFound, format!("Category {id} not found"))
}
