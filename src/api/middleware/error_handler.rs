//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure leaves the API as the error envelope. The rendered
//! [`ErrorResponse`] also travels in the response extensions so the request
//! id middleware can stamp the correlation id onto it.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Machine-readable code carried in the error envelope.
pub fn error_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::UnprocessableContent { .. } => "UNPROCESSABLE_CONTENT",
        AppError::Unauthorized { .. } => "UNAUTHORIZED",
        AppError::Forbidden { .. } => "FORBIDDEN",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

fn status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::UnprocessableContent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn error_body(error: &AppError) -> ErrorResponse {
    let code = error_code(error);

    match error {
        AppError::NotFound { .. } | AppError::Duplicate { .. } => {
            ErrorResponse::new(code, error.to_string())
        }
        AppError::Validation { field, reason } => ErrorResponse::new(code, error.to_string())
            .with_details(vec![crate::error::ValidationFieldError {
                field: field.clone(),
                message: reason.clone(),
            }]),
        AppError::ValidationErrors { errors } => {
            ErrorResponse::new(code, "Validation failed").with_details(errors.clone())
        }
        AppError::BadRequest { message }
        | AppError::UnprocessableContent { message }
        | AppError::Unauthorized { message }
        | AppError::Forbidden { message } => ErrorResponse::new(code, message.clone()),
        // Sources stay in the logs.
        AppError::Database { operation, .. } => {
            ErrorResponse::new(code, format!("Database operation failed: {operation}"))
        }
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, format!("Configuration error: {key}"))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(code, "Database connection unavailable")
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        render(status, error_body(&self))
    }
}

fn render(status: StatusCode, body: ErrorResponse) -> Response {
    let mut response = (status, Json(body.clone())).into_response();
    response.extensions_mut().insert(body);
    response
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Re-renders an error envelope with the request id attached. Responses
/// that are not error envelopes pass through unchanged.
pub(crate) fn attach_request_id(mut response: Response, request_id: &str) -> Response {
    match response.extensions_mut().remove::<ErrorResponse>() {
        Some(body) => {
            let status = response.status();
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(header::CONTENT_LENGTH);
            let rendered = render(status, body.with_request_id(request_id));
            let (new_parts, body) = rendered.into_parts();
            parts.extensions = new_parts.extensions;
            Response::from_parts(parts, body)
        }
        None => response,
    }
}

/// Turns error responses produced outside our handlers (unknown methods,
/// oversized bodies, timeouts) into the error envelope. Responses that
/// already carry a JSON body, such as a failing health check, pass through.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error())
        || response.extensions().get::<ErrorResponse>().is_some()
        || is_json(&response)
    {
        return response;
    }

    let (code, fallback) = match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request payload too large"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::SERVICE_UNAVAILABLE => {
            ("SERVICE_UNAVAILABLE", "Service temporarily unavailable")
        }
        s if s.is_server_error() => ("INTERNAL_ERROR", "An internal error occurred"),
        _ => ("UNKNOWN_ERROR", "The request could not be handled"),
    };

    let (_parts, body) = response.into_parts();
    let original = axum::body::to_bytes(body, 64 * 1024)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();
    let message = if original.is_empty() || status.is_server_error() {
        fallback.to_string()
    } else {
        original
    };

    render(status, ErrorResponse::new(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::not_found("order", "id", 1), StatusCode::NOT_FOUND),
            (
                AppError::Duplicate {
                    entity: "ratings".into(),
                    field: "order_id".into(),
                    value: "4".into(),
                },
                StatusCode::CONFLICT,
            ),
            (AppError::validation("email", "bad"), StatusCode::BAD_REQUEST),
            (
                AppError::ValidationErrors { errors: vec![] },
                StatusCode::BAD_REQUEST,
            ),
            (AppError::bad_request("nope"), StatusCode::BAD_REQUEST),
            (AppError::unprocessable("closed"), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::unauthorized("who"), StatusCode::UNAUTHORIZED),
            (AppError::forbidden("no"), StatusCode::FORBIDDEN),
            (
                AppError::Database {
                    operation: "insert".into(),
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Configuration {
                    key: "jwt.secret".into(),
                    source: anyhow::anyhow!("missing"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timeout"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("bug"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let response = AppError::not_found("order", "id", 42).into_response();
        let body = body_json(response).await;

        assert_eq!(body["status"], false);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Resource not found: order with id=42");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_validation_errors_carry_details() {
        let error = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "score".into(),
                message: "must be between 1 and 5".into(),
            }],
        };
        let body = body_json(error.into_response()).await;

        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], "score");
    }

    #[tokio::test]
    async fn test_internal_sources_are_hidden() {
        let error = AppError::Database {
            operation: "select users".into(),
            source: anyhow::anyhow!("password=hunter2"),
        };
        let body = body_json(error.into_response()).await;

        assert_eq!(body["message"], "Database operation failed: select users");
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_attach_request_id() {
        let response = AppError::forbidden("no").into_response();
        let response = attach_request_id(response, "req-9");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["request_id"], "req-9");
        assert_eq!(body["message"], "no");
    }

    #[tokio::test]
    async fn test_attach_request_id_ignores_success() {
        let response = (StatusCode::OK, "fine").into_response();
        let response = attach_request_id(response, "req-9");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"fine");
    }

    fn wrapped_app() -> axum::Router {
        use axum::routing::get;

        axum::Router::new()
            .route("/plain", get(|| async { (StatusCode::BAD_REQUEST, "bad input") }))
            .route(
                "/degraded",
                get(|| async {
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        Json(serde_json::json!({ "status": "unhealthy" })),
                    )
                }),
            )
            .layer(axum::middleware::from_fn(global_error_handler))
    }

    async fn call(path: &str) -> Response {
        use tower::ServiceExt;

        wrapped_app()
            .oneshot(
                axum::http::Request::get(path)
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_plain_errors_become_envelopes() {
        let response = call("/plain").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["message"], "bad input");
    }

    #[tokio::test]
    async fn test_json_errors_pass_through() {
        let response = call("/degraded").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "status": "unhealthy" }));
    }

    #[tokio::test]
    async fn test_unrouted_method_becomes_envelope() {
        use tower::ServiceExt;

        let response = wrapped_app()
            .oneshot(
                axum::http::Request::post("/plain")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
        assert_eq!(body["message"], "HTTP method not allowed for this endpoint");
    }
}
