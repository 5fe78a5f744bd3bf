//! Order API Module
//!
//! 所有已登录角色都可以查看、创建和更新订单。
//! 删除只允许 ADMIN/MANAGER 或订单创建者，创建者判断在服务层完成。

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::{Action, Resource, require_permission};
use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(Resource::Order, Action::Read)));

    let create = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_permission(Resource::Order, Action::Create)));

    let update = Router::new()
        .route("/{id}", patch(handler::update))
        .layer(middleware::from_fn(require_permission(Resource::Order, Action::Update)));

    read.merge(create)
        .merge(update)
        .merge(Router::new().route("/{id}", delete(handler::delete)))
}
