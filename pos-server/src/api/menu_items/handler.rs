//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::utils::validation::{validate_optional_required_text, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemWithCategory};

/// GET /api/menu/items - 所有菜品 (含分类名，按名称排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItemWithCategory>>> {
    let items = menu_item::find_all_with_category(&state.pool).await?;
    Ok(Json(items))
}

/// GET /api/menu/items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItemWithCategory>> {
    let item = menu_item::find_by_id_with_category(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {} not found", id))
        })?;
    Ok(Json(item))
}

/// POST /api/menu/items - 创建菜品 (分类不存在返回 400)
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    validate_required_text(&payload.name, "name")?;

    let created = menu_item::create(&state.pool, payload).await?;
    tracing::info!(
        menu_item_id = created.id,
        name = %created.name,
        price = %created.price,
        "Menu item created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/menu/items/{id} - 更新菜品
///
/// 价格变更不影响已有订单 (订单明细保存下单时的价格快照)。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    validate_optional_required_text(payload.name.as_deref(), "name")?;

    let updated = menu_item::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/menu/items/{id} - 删除菜品 (被订单引用时返回 409)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    menu_item::delete(&state.pool, id).await?;
    tracing::info!(menu_item_id = id, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
