//! Authentication Routes

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::{Action, Resource, require_permission};
use crate::core::ServerState;

/// Build authentication router
/// - /api/auth/register, /api/auth/login: public (skipped by require_auth)
/// - /api/auth/me: any authenticated role
pub fn router() -> Router<ServerState> {
    let profile = Router::new()
        .route("/api/auth/me", get(handler::me))
        .layer(middleware::from_fn(require_permission(Resource::Profile, Action::Read)));

    Router::new()
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
        .merge(profile)
}
