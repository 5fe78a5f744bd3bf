//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, category, menu_item};
use crate::utils::validation::{validate_optional_required_text, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};
use shared::models::{Category, CategoryCreate, CategoryUpdate, CategoryWithItems};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {} not found", id))
}

/// GET /api/menu/categories - 获取所有分类 (按名称排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/menu/categories/{id} - 获取单个分类及其全部菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CategoryWithItems>> {
    let found = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let menu_items = menu_item::find_by_category(&state.pool, id).await?;
    Ok(Json(CategoryWithItems {
        category: found,
        menu_items,
    }))
}

/// POST /api/menu/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    validate_required_text(&payload.name, "name")?;

    let created = category::create(&state.pool, payload).await?;
    tracing::info!(category_id = created.id, name = %created.name, "Category created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/menu/categories/{id} - 更新分类 (省略的字段保持不变)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    validate_optional_required_text(payload.name.as_deref(), "name")?;

    let updated = category::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/menu/categories/{id} - 删除分类 (仍有菜品时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    category::delete(&state.pool, id).await.map_err(|e| {
        if let RepoError::Business(ErrorCode::CategoryHasMenuItems, _) = &e {
            tracing::warn!(category_id = id, "Refused to delete category with menu items");
        }
        AppError::from(e)
    })?;
    tracing::info!(category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
