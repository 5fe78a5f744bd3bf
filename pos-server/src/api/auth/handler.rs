//! Authentication Handlers
//!
//! Handles registration, login and the current-user lookup

use std::time::Duration;

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::auth::{CurrentUser, hash_password, verify_dummy, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{ApiResponse, AppError, ErrorCode, ValidatedJson};
use shared::client::{LoginRequest, LoginResponse, RegisterRequest};
use shared::models::{Role, UserInfo};

/// Register handler
///
/// New accounts always get the STAFF role.
pub async fn register(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), AppError> {
    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let created = user::create(&state.pool, &req.name, &req.email, &password_hash, Role::Staff)
        .await
        .map_err(|e| {
            tracing::warn!(email = %req.email, error = %e, "Registration rejected");
            AppError::from(e)
        })?;

    tracing::info!(user_id = created.id, email = %created.email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "User registered successfully",
            UserInfo::from(created),
        )),
    ))
}

/// Login handler
///
/// Unknown email and wrong password give the same error after the same work:
/// a fixed delay plus one argon2 verification (against a dummy hash when the
/// email has no account).
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let found = user::find_by_email(&state.pool, &req.email).await?;

    // Fixed delay before the result is inspected
    tokio::time::sleep(Duration::from_millis(state.config.login_delay_ms)).await;

    let account = match found {
        Some(account) => {
            let password_valid = verify_password(&req.password, &account.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !password_valid {
                crate::security_log!("WARN", "login_failed", email = req.email.as_str(), reason = "invalid_password");
                return Err(AppError::invalid_credentials());
            }
            account
        }
        None => {
            verify_dummy(&req.password);
            crate::security_log!("WARN", "login_failed", email = req.email.as_str(), reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .get_jwt_service()
        .generate_token(&account)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = account.id,
        email = %account.email,
        role = %account.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo::from(account),
    }))
}

/// Get current user info
///
/// Reads the stored record so a deleted account is reported as missing.
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<UserInfo>, AppError> {
    let account = user::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::UserNotFound, "User not found"))?;
    Ok(Json(UserInfo::from(account)))
}
