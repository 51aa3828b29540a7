//! # API Error Types
//!
//! Error types for backend calls, with extraction of the user-facing
//! message the server embeds in failure bodies.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Transport failure (reqwest::Error)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (this module) ← Http / Network / Decode                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  user_message() ← parses {"message": "..."} or {"message": [...]}      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Terminal shows the text in the error dialog                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Default text when the backend body carries no usable message.
const GENERIC_MESSAGE: &str = "Ocurrió un error al comunicarse con el servidor";

/// Errors from backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    ///
    /// `message` holds the raw response body; [`ApiError::user_message`]
    /// digs the human-readable part out of it.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (DNS, refused connection,
    /// timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected type.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Extracts the message a cashier should see.
    ///
    /// The backend wraps validation failures NestJS-style:
    /// `{"message": "texto"}` or `{"message": ["uno", "dos"]}`. When the
    /// body is not shaped like that, falls back to a generic text rather
    /// than leaking transport internals into the dialog.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => extract_backend_message(message)
                .unwrap_or_else(|| GENERIC_MESSAGE.to_string()),
            ApiError::Network(_) | ApiError::Decode(_) => GENERIC_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Pulls `message` out of a JSON error body.
///
/// Accepts both the single-string and array-of-strings forms; array
/// entries are joined with newlines, matching how the terminal stacks
/// multiple validation messages in one dialog.
fn extract_backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let lines: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        }
        _ => None,
    }
}

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_from_string_body() {
        let err = ApiError::Http {
            status: 400,
            message: r#"{"message":"Stock insuficiente","statusCode":400}"#.to_string(),
        };
        assert_eq!(err.user_message(), "Stock insuficiente");
    }

    #[test]
    fn test_user_message_from_array_body() {
        let err = ApiError::Http {
            status: 400,
            message: r#"{"message":["cantidad must be positive","monto is required"]}"#
                .to_string(),
        };
        assert_eq!(
            err.user_message(),
            "cantidad must be positive\nmonto is required"
        );
    }

    #[test]
    fn test_user_message_falls_back_on_garbage() {
        let err = ApiError::Http {
            status: 502,
            message: "<html>Bad Gateway</html>".to_string(),
        };
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn test_network_error_is_generic() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
    }
}
