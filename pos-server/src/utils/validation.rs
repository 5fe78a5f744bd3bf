//! Input validation helpers
//!
//! Field lengths and formats are declared on the request types with
//! `validator`. What a derive cannot express lives here: a required name
//! must contain something other than whitespace.

use crate::utils::AppError;

/// Reject a required name that is empty after trimming
pub fn validate_required_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(blank(field));
    }
    Ok(())
}

/// Same as [`validate_required_text`] for a PATCH field that may be omitted
pub fn validate_optional_required_text(value: Option<&str>, field: &str) -> Result<(), AppError> {
    match value {
        Some(v) => validate_required_text(v, field),
        None => Ok(()),
    }
}

fn blank(field: &str) -> AppError {
    let message = format!("{field} must not be empty");
    let mut errors = serde_json::Map::new();
    errors.insert(field.to_string(), serde_json::json!([message.clone()]));
    AppError::validation(message).with_detail("errors", errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Soup", "name").is_ok());
        let err = validate_required_text("   ", "name").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert!(details["errors"]["name"].is_array());
    }

    #[test]
    fn test_optional_required_text() {
        assert!(validate_optional_required_text(None, "name").is_ok());
        assert!(validate_optional_required_text(Some("Tea"), "name").is_ok());
        assert!(validate_optional_required_text(Some(""), "name").is_err());
    }
}
