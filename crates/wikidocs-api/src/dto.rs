//! The uniform result envelope returned by every endpoint.

use serde::{Deserialize, Serialize};

/// Error details carried inside a failed envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    pub message: String,
    /// HTTP status code of the failure.
    pub code: u16,
}

/// Standard response wrapper for single items and collections alike.
///
/// `code` always carries the HTTP status; on failure `data` is absent
/// and `error` is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// HTTP status code.
    pub code: u16,
    /// Response data, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: "OK".to_string(),
            code: 200,
            data: Some(data),
            error: None,
        }
    }

    /// A successful creation response.
    pub fn created(data: T) -> Self {
        Self {
            success: true,
            message: "Created".to_string(),
            code: 201,
            data: Some(data),
            error: None,
        }
    }

    /// A failed response.
    pub fn fail(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            message: message.clone(),
            code,
            data: None,
            error: Some(ApiErrorBody { message, code }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let envelope = ApiResponse::ok(42);
        assert!(envelope.success);
        assert_eq!(envelope.code, 200);
        assert_eq!(envelope.data, Some(42));
        assert!(envelope.error.is_none());
    }

    #[test]
    fn test_fail_envelope_carries_error_body() {
        let envelope = ApiResponse::<()>::fail(404, "Article 9 not found");
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        let error = envelope.error.unwrap();
        assert_eq!(error.code, 404);
        assert_eq!(error.message, "Article 9 not found");
    }

    #[test]
    fn test_fail_envelope_omits_data_field_in_json() {
        let json = serde_json::to_value(ApiResponse::<()>::fail(500, "boom")).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], 500);
    }
}
