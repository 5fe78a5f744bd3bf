//! Conversion of `validator` failures into [`AppError`]

use super::codes::ErrorCode;
use super::types::AppError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Flatten nested validation errors into `path -> [messages]`
///
/// Nested structs are joined with `.`, list entries with `[index]`,
/// e.g. `items[0].quantity`.
pub fn flatten_validation_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    collect(errors, String::new(), &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: String, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(path).or_default();
                for err in list {
                    let msg = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", err.code));
                    messages.push(msg);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, path, out),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect(inner, format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: Map<String, Value> = flatten_validation_errors(&errors)
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect();
        AppError::new(ErrorCode::ValidationFailed).with_detail("errors", Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Line {
        #[validate(range(min = 1, message = "Quantity must be at least 1"))]
        quantity: i64,
    }

    #[derive(Validate)]
    struct Cart {
        #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
        name: String,
        #[validate(nested)]
        items: Vec<Line>,
    }

    #[test]
    fn test_flatten_nested_list_paths() {
        let cart = Cart {
            name: "x".to_string(),
            items: vec![Line { quantity: 1 }, Line { quantity: 0 }],
        };
        let errors = cart.validate().unwrap_err();
        let flat = flatten_validation_errors(&errors);

        assert_eq!(
            flat.get("name").unwrap(),
            &vec!["Name must be at least 2 characters".to_string()]
        );
        assert_eq!(
            flat.get("items[1].quantity").unwrap(),
            &vec!["Quantity must be at least 1".to_string()]
        );
        assert!(!flat.contains_key("items[0].quantity"));
    }

    #[test]
    fn test_into_app_error() {
        let cart = Cart {
            name: "x".to_string(),
            items: vec![],
        };
        let err: AppError = cart.validate().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert!(details["errors"].get("name").is_some());
    }
}
