//! POS Server - 餐厅点餐系统后端
//!
//! # 架构概述
//!
//! JSON over HTTP 服务，提供以下核心功能：
//!
//! - **数据库** (`db`): SQLite (WAL) 存储、迁移和首次启动种子数据
//! - **认证** (`auth`): JWT + Argon2 认证体系，角色策略
//! - **订单** (`orders`): 服务端定价、事务落库、状态流转
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── auth/          # JWT 认证、密码、权限策略、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单定价、状态机、服务
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 连接池、仓储、种子数据
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境
///
/// 1. 加载 `.env` (不存在时忽略)
/// 2. 按 `LOG_LEVEL` / `LOG_FORMAT` / `LOG_DIR` 初始化日志
pub fn setup_environment() {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());

    init_logger_with_file(log_level.as_deref(), json, log_dir.as_deref());

    if !dotenv_loaded {
        tracing::debug!("No .env file found, using process environment");
    }
}

pub fn print_banner() {
    println!(
        r#"
    ____  ____  _____
   / __ \/ __ \/ ___/
  / /_/ / / / /\__ \
 / ____/ /_/ /___/ /
/_/    \____//____/
   ______
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
