//! Unified error system for the POS service
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors
//! - 8xxx: User errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::business_rule(ErrorCode::OrderMenuItemsMissing, "Menu items not found: 42")
//!     .with_detail("missing_ids", vec![42_i64]);
//! assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
//!
//! let body = ApiResponse::<()>::error(&err);
//! assert_eq!(body.code, Some(4003));
//! ```

mod category;
mod codes;
mod http;
mod types;
mod validation;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
pub use validation::flatten_validation_errors;
