//! 统一错误处理
//!
//! 错误类型和响应结构统一来自 `shared::error`：
//! - [`AppError`] - 应用错误 (错误码 + 消息 + details)
//! - [`ApiResponse`] - API 响应结构
//!
//! 本模块额外提供 [`ValidatedJson`] 提取器。
//!
//! # 使用示例
//!
//! ```ignore
//! async fn create(ValidatedJson(payload): ValidatedJson<CategoryCreate>) -> AppResult<...> {
//!     Err(AppError::new(ErrorCode::CategoryNotFound))
//! }
//! ```

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// JSON 请求体提取器，反序列化后立即执行 `validator` 校验
///
/// | 失败 | 结果 |
/// |------|------|
/// | 非 JSON / 语法错误 / 字段类型错误 | 400 ValidationFailed |
/// | 字段校验失败 | 400 ValidationFailed, `details.errors` |
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// 带自定义消息的成功响应
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
