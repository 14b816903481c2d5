//! Errors returned by account API calls.

use serde_json::Value;
use thiserror::Error;

/// Shown when the server gives no usable explanation.
pub const GENERIC_SERVER_ERROR: &str = "Server error!";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Server error: {0}")]
    Transport(String),
    /// The server answered with a non-success status. `message` is what
    /// the body explained, if anything.
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_SERVER_ERROR))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("Login failed: No token received.")]
    MissingToken,
    #[error("Not signed in")]
    NotAuthenticated,
    #[error("Token cannot be sent in a header")]
    InvalidToken,
    /// The request could not be built, so nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Builds a rejection from a status and the raw response body.
    pub fn rejected(status: u16, body: &str) -> Self {
        ApiError::Rejected {
            status,
            message: decode_error_body(body),
        }
    }

    /// The explanation the server sent, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True when the failure means the credential is no longer accepted.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApiError::NotAuthenticated
                | ApiError::InvalidToken
                | ApiError::Rejected { status: 401 | 403, .. }
        )
    }
}

/// Extracts a user-facing message from an error response body.
///
/// The service replies either with `{"message": "..."}` or with a mapping
/// of field name to a list of messages. Field messages are flattened in
/// the order the server sent them and joined with newlines. A body that
/// is not JSON is returned as-is. Returns `None` if nothing usable is left.
pub fn decode_error_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(_) => return Some(trimmed.to_string()),
    };

    let message = match value {
        Value::Object(map) => {
            if let Some(message) = map.get("message").filter(|m| !m.is_null()) {
                scalar_text(message)
            } else {
                let mut lines = Vec::new();
                for field in map.values() {
                    flatten_into(field, &mut lines);
                }
                lines.join("\n")
            }
        }
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };

    (!message.trim().is_empty()).then_some(message)
}

fn flatten_into(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| flatten_into(item, out)),
        Value::Null => {}
        other => out.push(scalar_text(other)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
