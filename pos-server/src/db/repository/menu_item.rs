//! Menu Item Repository

use super::{RepoError, RepoResult, category, decimal_text};
use shared::error::ErrorCode;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemWithCategory};
use shared::util::{now_millis, snowflake_id};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

const COLUMNS: &str =
    "id, name, description, price, image, is_available, category_id, created_at, updated_at";

const JOINED: &str = "SELECT m.id, m.name, m.description, m.price, m.image, m.is_available, m.category_id, \
     m.created_at, m.updated_at, c.name AS category_name \
     FROM menu_item m JOIN category c ON c.id = m.category_id";

/// All items with their category name, by item name
pub async fn find_all_with_category(pool: &SqlitePool) -> RepoResult<Vec<MenuItemWithCategory>> {
    let items = sqlx::query_as::<_, MenuItemWithCategory>(&format!("{JOINED} ORDER BY m.name"))
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn find_by_id_with_category(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<MenuItemWithCategory>> {
    let item = sqlx::query_as::<_, MenuItemWithCategory>(&format!("{JOINED} WHERE m.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(&format!("SELECT {COLUMNS} FROM menu_item WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

/// Items of one category (available or not), by name
pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE category_id = ? ORDER BY name"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Available items only, by name
pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE is_available = 1 ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Fetch the given ids; unknown ids are simply absent from the result
pub async fn find_by_ids<'e, E>(executor: E, ids: &[i64]) -> RepoResult<Vec<MenuItem>>
where
    E: SqliteExecutor<'e>,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM menu_item WHERE id IN ("));
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let items = qb.build_query_as::<MenuItem>().fetch_all(executor).await?;
    Ok(items)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    ensure_category(pool, data.category_id).await?;

    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO menu_item (id, name, description, price, image, is_available, category_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(decimal_text(data.price))
    .bind(&data.image)
    .bind(data.is_available)
    .bind(data.category_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Partial update; omitted fields keep their stored value
///
/// `description` and `image` are cleared by `Some(None)`.
pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    if let Some(category_id) = data.category_id {
        ensure_category(pool, category_id).await?;
    }

    let rows = sqlx::query(
        "UPDATE menu_item SET \
            name = COALESCE(?1, name), \
            description = CASE WHEN ?2 THEN ?3 ELSE description END, \
            price = COALESCE(?4, price), \
            image = CASE WHEN ?5 THEN ?6 ELSE image END, \
            is_available = COALESCE(?7, is_available), \
            category_id = COALESCE(?8, category_id), \
            updated_at = ?9 \
         WHERE id = ?10",
    )
    .bind(&data.name)
    .bind(data.description.is_some())
    .bind(data.description.as_ref().and_then(|d| d.as_deref()))
    .bind(data.price.map(decimal_text))
    .bind(data.image.is_some())
    .bind(data.image.as_ref().and_then(|i| i.as_deref()))
    .bind(data.is_available)
    .bind(data.category_id)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Delete an item; refused while order lines still reference it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::ForeignKey(_) => RepoError::Business(
                ErrorCode::MenuItemInUse,
                "Menu item is referenced by existing orders".into(),
            ),
            other => other,
        })?;
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

async fn ensure_category(pool: &SqlitePool, category_id: i64) -> RepoResult<()> {
    if category::exists(pool, category_id).await? {
        Ok(())
    } else {
        Err(RepoError::Validation(format!(
            "Category {category_id} does not exist"
        )))
    }
}

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
}
