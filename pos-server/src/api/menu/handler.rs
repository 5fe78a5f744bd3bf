//! Public Menu Handler

use std::collections::HashMap;

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::{category, menu_item};
use crate::utils::AppResult;
use shared::models::{MenuCategory, MenuItem};

/// GET /api/menu - 按名称排序的分类，每个分类只含可售菜品 (按名称排序)
///
/// 没有可售菜品的分类也会返回 (空列表)。
pub async fn public_menu(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuCategory>>> {
    let categories = category::find_all(&state.pool).await?;

    let mut by_category: HashMap<i64, Vec<MenuItem>> = HashMap::new();
    for item in menu_item::find_available(&state.pool).await? {
        by_category.entry(item.category_id).or_default().push(item);
    }

    let menu = categories
        .into_iter()
        .map(|c| MenuCategory {
            menu_items: by_category.remove(&c.id).unwrap_or_default(),
            id: c.id,
            name: c.name,
            description: c.description,
        })
        .collect();

    Ok(Json(menu))
}
