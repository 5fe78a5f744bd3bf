//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册、登录、当前用户
//! - [`menu`] - 公开菜单
//! - [`categories`] - 分类管理接口
//! - [`menu_items`] - 菜品管理接口
//! - [`orders`] - 订单管理接口
//!
//! 每个子模块提供 `router()`，由 [`crate::core::server::build_routes`] 合并。

pub mod auth;
pub mod categories;
pub mod health;
pub mod menu;
pub mod menu_items;
pub mod orders;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
