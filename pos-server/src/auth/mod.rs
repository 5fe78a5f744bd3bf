//! 认证授权模块
//!
//! 提供 JWT 认证、密码哈希、角色策略和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`policy`] - 角色 × 资源 × 操作 授权表
//! - [`require_auth`] - 认证中间件
//! - [`require_permission`] - 权限检查中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{is_public_route, require_auth, require_permission};
pub use password::{hash_password, verify_dummy, verify_password};
pub use policy::{Action, Resource};
