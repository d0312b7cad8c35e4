//! Router assembly: route groups, OpenAPI document and middleware stack.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, StatusCode, Uri, header};
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    REQUEST_ID_HEADER, auth_middleware, global_error_handler, logging_middleware,
    request_id_middleware,
};
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Builds the application router.
///
/// Everything under `/api` except `/api/auth` requires a bearer token.
/// Health checks live at the root, Swagger UI at `/swagger-ui`.
///
/// Layers run outermost first: CORS, compression, request id, logging,
/// error envelope, timeout.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let protected = OpenApiRouter::new()
        .nest("/me", handlers::me::me_routes())
        .nest("/users", handlers::users::user_routes())
        .nest("/groups", handlers::groups::group_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/orders", handlers::orders::order_routes())
        .nest("/ratings", handlers::ratings::rating_routes())
        .nest("/notifications", handlers::notifications::notification_routes())
        .nest("/work-posts", handlers::work_posts::work_post_routes())
        .nest("/dashboard", handlers::dashboard::dashboard_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api = OpenApiRouter::new()
        .nest("/auth", handlers::auth::auth_routes())
        .merge(protected);

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .fallback(route_not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout),
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&server.cors_allowed_origins))
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found("route", "path", uri.path())
}

/// An empty origin list allows any origin. Origins that are not valid
/// header values are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, request_id.clone()])
        .expose_headers([request_id]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::state::test_support::lazy_state;

    fn app() -> Router {
        create_router(lazy_state(), &ServerConfig::default())
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_liveness_is_public() {
        let response = app()
            .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let response = app()
            .oneshot(Request::get("/api/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Missing authorization header");
        assert_eq!(body["request_id"], request_id.as_str());
    }

    #[tokio::test]
    async fn test_malformed_bearer_is_rejected() {
        let response = app()
            .oneshot(
                Request::get("/api/dashboard")
                    .header(header::AUTHORIZATION, "Token abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let response = app()
            .oneshot(
                Request::get("/api/nowhere")
                    .header(REQUEST_ID_HEADER, "req-404")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["request_id"], "req-404");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_routes() {
        let response = app()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let paths = body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/auth/login"));
        assert!(paths.contains_key("/api/work-posts/matching"));
        assert!(paths.contains_key("/health/live"));
    }

    #[test]
    fn test_cors_layer_accepts_origin_lists() {
        let _ = cors_layer(&[]);
        let _ = cors_layer(&["https://app.example.com".to_string()]);
    }
}
