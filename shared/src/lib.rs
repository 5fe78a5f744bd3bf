//! Shared types for the POS service
//!
//! Data models, request/response DTOs, the unified error system and
//! id/time utilities used by the server and its API clients.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
