use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// Deliberately loose: the store-side validator enforces the same
/// `.+@.+` shape, and both must agree on what passes.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+@.+$").expect("compile email regex"));

const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "password"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Field {0} must be a non-empty string")]
    InvalidField(&'static str),
    #[error("Invalid email format")]
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Structural check applied to create/update payloads before any
/// write reaches the store. Fields beyond the required three are left
/// alone and passed through to the record.
pub fn validate_user(payload: &Value) -> Result<(), ValidateError> {
    let fields = payload.as_object().ok_or(ValidateError::NotAnObject)?;

    for name in REQUIRED_FIELDS {
        match fields.get(name) {
            None | Some(Value::Null) => return Err(ValidateError::MissingField(name)),
            Some(Value::String(value)) if !value.is_empty() => {}
            Some(_) => return Err(ValidateError::InvalidField(name)),
        }
    }

    let email = fields["email"].as_str().unwrap_or_default();
    if !is_valid_email(email) {
        return Err(ValidateError::InvalidEmail);
    }

    Ok(())
}
