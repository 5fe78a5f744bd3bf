//! Auth request/response types shared between server and API clients

use crate::models::UserInfo;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 200, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 254, message = "Email is too long")
    )]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register("Jo", "jo@restaurant.com", "secret").validate().is_ok());
        assert!(register("J", "jo@restaurant.com", "secret").validate().is_err());
        assert!(register("Jo", "not-an-email", "secret").validate().is_err());
        assert!(register("Jo", "jo@restaurant.com", "12345").validate().is_err());
    }

    #[test]
    fn test_login_validation() {
        let req = LoginRequest {
            email: "staff@restaurant.com".into(),
            password: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
