//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::time::Duration;

use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::{Config, Result, ServerError, ServerState};

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// 请求 ID 生成器 (snowflake)
#[derive(Clone, Copy)]
struct SnowflakeRequestId;

impl MakeRequestId for SnowflakeRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        Some(RequestId::new(HeaderValue::from(shared::util::snowflake_id())))
    }
}

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// 组装所有路由 (未绑定状态)
pub fn build_routes() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::menu::router())
        .merge(crate::api::categories::router())
        .merge(crate::api::menu_items::router())
        .merge(crate::api::orders::router())
}

/// 构建完整应用: 路由 + 认证 + 请求 ID/追踪/CORS/压缩 + 访问日志
///
/// 测试直接对返回的 Router 调用 `oneshot`。
pub fn build_app(state: ServerState) -> Router {
    build_routes()
        // JWT 认证中间件 - require_auth 内部会跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        // ServiceBuilder 中越靠前越外层
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, SnowflakeRequestId))
                .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(log_request))
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// 使用已初始化的状态创建服务器
    pub fn new(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// 启动 HTTP 服务，直到收到 Ctrl+C
    ///
    /// 收到信号后停止接受新连接，在 `shutdown_timeout_ms` 内等待已有请求完成，
    /// 随后关闭数据库连接池。
    pub async fn run(&self) -> Result<()> {
        let state = self.state.clone();

        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        tracing::info!("🍽️  POS server listening on {}", addr);

        let app = build_app(state.clone());
        let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();

        let mut serve = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("Shutting down...");
                    let _ = signal_tx.send(());
                })
                .await
        });

        let outcome = tokio::select! {
            joined = &mut serve => Some(joined),
            _ = signal_rx => {
                let grace = Duration::from_millis(self.config.shutdown_timeout_ms);
                match tokio::time::timeout(grace, &mut serve).await {
                    Ok(joined) => Some(joined),
                    Err(_) => {
                        tracing::warn!(timeout_ms = self.config.shutdown_timeout_ms, "Graceful shutdown timed out, aborting");
                        serve.abort();
                        None
                    }
                }
            }
        };

        state.shutdown().await;
        tracing::info!("Server stopped");

        match outcome {
            Some(Ok(result)) => result.map_err(ServerError::from),
            Some(Err(e)) => Err(ServerError::Task(e.to_string())),
            None => Ok(()),
        }
    }
}
