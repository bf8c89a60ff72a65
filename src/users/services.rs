use serde_json::Value;

use crate::error::ApiError;

/// An absent body, JSON null, `{}`, `[]`, `""`, `0`, and `false` all count
/// as an empty payload.
pub(crate) fn payload_is_empty(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Update only re-checks uniqueness when the email actually changes; a user
/// keeping its current email must not trip a conflict.
pub(crate) fn email_change_needs_uniqueness_check(new: &str, current: &str) -> bool {
    new != current
}

/// Format rule carried over from the system this replaces: an email is
/// valid when it contains an `@`.
pub(crate) fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(ApiError::Validation("Invalid email address".into()))
    }
}

/// Pulls a required string field out of a create payload. The error detail
/// is the quoted key name, which is what the client contract expects.
pub(crate) fn require_field(data: &Value, key: &str) -> Result<String, ApiError> {
    data.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::MissingField(format!("'{key}'")))
}
