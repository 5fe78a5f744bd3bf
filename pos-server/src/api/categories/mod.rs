//! Category API 模块
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/menu/categories | GET | 公开 |
//! | /api/menu/categories/{id} | GET | 公开 |
//! | /api/menu/categories | POST | menu:create |
//! | /api/menu/categories/{id} | PATCH | menu:update |
//! | /api/menu/categories/{id} | DELETE | menu:delete |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::{Action, Resource, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu/categories", routes())
}

fn routes() -> Router<ServerState> {
    let read = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let create = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_permission(Resource::Menu, Action::Create)));

    let update = Router::new()
        .route("/{id}", patch(handler::update))
        .layer(middleware::from_fn(require_permission(Resource::Menu, Action::Update)));

    let remove = Router::new()
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_permission(Resource::Menu, Action::Delete)));

    read.merge(create).merge(update).merge(remove)
}
