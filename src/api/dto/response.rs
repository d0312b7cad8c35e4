//! The `{status, message, data}` envelope every endpoint answers with.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = true)]
    pub status: bool,
    #[schema(example = "OK")]
    pub message: String,
    pub data: Option<T>,
    #[serde(skip)]
    code: StatusCode,
}

/// Placeholder payload for responses that only carry a message.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NoData {}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_code(StatusCode::OK, message, Some(data))
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_code(StatusCode::CREATED, message, Some(data))
    }

    fn with_code(code: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: true,
            message: message.into(),
            data,
            code,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.code
    }
}

impl ApiResponse<NoData> {
    /// Envelope with `data: null`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::OK, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let response = ApiResponse::ok("Fetched", json!({"id": 7}));
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": true, "message": "Fetched", "data": {"id": 7}})
        );
    }

    #[test]
    fn test_created_envelope() {
        let response = ApiResponse::created("Created", 1);
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    #[test]
    fn test_message_only_has_null_data() {
        let value = serde_json::to_value(ApiResponse::message("Deleted")).unwrap();
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["status"], json!(true));
    }

    #[test]
    fn test_into_response_keeps_status_code() {
        let response = ApiResponse::created("Created", "x").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
