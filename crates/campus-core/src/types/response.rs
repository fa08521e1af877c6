//! The uniform response envelope returned by every API endpoint.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The envelope wrapping every API response body.
///
/// `error` is `None` on success and carries a machine-readable code on
/// failure. `timestamp` is the UTC time the response was produced, in
/// `YYYY-MM-DD HH:MM:SS` form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Payload, or `null` for empty successes and all errors.
    pub data: Option<T>,
    /// Machine-readable error code, or `null` on success.
    pub error: Option<String>,
    /// UTC timestamp of the response.
    pub timestamp: String,
}

impl<T: Serialize> Envelope<T> {
    /// Create a successful envelope carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: wire_timestamp(),
        }
    }
}

impl Envelope<serde_json::Value> {
    /// Create a successful envelope with no payload (`data: null`).
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
            timestamp: wire_timestamp(),
        }
    }

    /// Create an error envelope with a machine-readable code.
    pub fn err(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(code.into()),
            timestamp: wire_timestamp(),
        }
    }
}

/// Format the current UTC time for the envelope.
fn wire_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let env = Envelope::ok("Users retrieved successfully", vec![1, 2, 3]);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["error"], serde_json::Value::Null);
    }

    #[test]
    fn test_err_envelope_shape() {
        let env = Envelope::err("User not found", "NOT_FOUND");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["data"], serde_json::Value::Null);
        assert_eq!(json["error"], "NOT_FOUND");
    }
}
