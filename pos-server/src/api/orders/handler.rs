//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders;
use crate::utils::{ApiResponse, AppResult, ValidatedJson, ok_with_message};
use shared::models::{OrderCreate, OrderDetail, OrderUpdate};

/// GET /api/orders - 所有订单 (最新在前，含创建者和明细)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderDetail>>> {
    Ok(Json(orders::list_orders(&state.pool).await?))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    Ok(Json(orders::get_order(&state.pool, id).await?))
}

/// POST /api/orders - 创建订单
///
/// 金额由服务端按当前菜品价格计算。
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderDetail>>)> {
    let detail = orders::create_order(&state.pool, user.id, payload).await?;
    Ok((
        StatusCode::CREATED,
        ok_with_message(detail, "Order created successfully"),
    ))
}

/// PATCH /api/orders/{id} - 更新状态和备注
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<OrderUpdate>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let detail = orders::update_order(&state.pool, id, payload).await?;
    Ok(ok_with_message(detail, "Order updated successfully"))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<()>>> {
    orders::delete_order(&state.pool, id, &user).await?;
    Ok(Json(ApiResponse {
        message: "Order deleted successfully".to_string(),
        ..ApiResponse::ok()
    }))
}
