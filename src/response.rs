//! Response envelope shared by every endpoint.

use serde::Serialize;

/// Outcome marker carried in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
    Error,
}

/// Wrapper returned by every endpoint: `{status, data, message}` on
/// success, `{status, message, error?}` on failure.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            message: message.to_string(),
            error: None,
        }
    }
}

impl Envelope<serde_json::Value> {
    pub fn failed(message: &str) -> Self {
        Self {
            status: Status::Failed,
            data: None,
            message: message.to_string(),
            error: None,
        }
    }

    pub fn failed_with(message: &str, error: &str) -> Self {
        Self {
            status: Status::Failed,
            data: None,
            message: message.to_string(),
            error: Some(error.to_string()),
        }
    }

    /// Last-resort shape; carries no detail.
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            data: None,
            message: message.to_string(),
            error: None,
        }
    }
}
