//! Error response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::NoData;
use crate::error::ValidationFieldError;

/// Error envelope: same shape as a success response with `status: false`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "status": false,
    "message": "Resource not found: order with id=42",
    "code": "NOT_FOUND",
    "request_id": "8f14e45f-ceea-467f-a0e6-7c1b2a6c1d0e",
    "data": null
}))]
pub struct ErrorResponse {
    pub status: bool,
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationFieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub data: Option<NoData>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            code: code.to_string(),
            details: None,
            request_id: None,
            data: None,
        }
    }

    pub fn with_details(mut self, details: Vec<ValidationFieldError>) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_error_shape() {
        let value = serde_json::to_value(ErrorResponse::new("FORBIDDEN", "Access denied")).unwrap();
        assert_eq!(
            value,
            json!({"status": false, "message": "Access denied", "code": "FORBIDDEN", "data": null})
        );
    }

    #[test]
    fn test_details_and_request_id() {
        let response = ErrorResponse::new("VALIDATION_ERROR", "Validation failed")
            .with_details(vec![ValidationFieldError {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            }])
            .with_request_id("req-1");
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["details"][0]["field"], "email");
        assert_eq!(value["request_id"], "req-1");
    }
}
