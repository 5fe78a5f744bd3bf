//! Public Menu API 模块
//!
//! `GET /api/menu` - 所有分类及其可售菜品 (无需认证)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu", get(handler::public_menu))
}
