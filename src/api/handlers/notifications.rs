//! Notification inbox handlers.

use axum::{
    Extension,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{
    ApiResponse, ErrorResponse, NoData, NotificationListQuery, NotificationResponse,
    PagedResponse, PaginationParams, ReadAllResponse, UnreadCountResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedQuery;

/// Creates notification routes.
///
/// Routes:
/// - GET /               - My notifications, newest first
/// - GET /unread-count   - Number of unread notifications
/// - PATCH /{id}/read    - Mark one as read
/// - POST /read-all      - Mark all as read
/// - DELETE /{id}        - Delete one
pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_notifications))
        .routes(routes!(unread_count))
        .routes(routes!(mark_read))
        .routes(routes!(mark_all_read))
        .routes(routes!(delete_notification))
}

/// GET /api/notifications
#[utoipa::path(
    get,
    path = "/",
    tag = NOTIFICATION_TAG,
    params(PaginationParams, NotificationListQuery),
    responses(
        (status = 200, description = "Paged notifications", body = ApiResponse<PagedResponse<NotificationResponse>>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_notifications(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(query): ValidatedQuery<NotificationListQuery>,
) -> AppResult<ApiResponse<PagedResponse<NotificationResponse>>> {
    let page = params.resolve(&state.pagination)?;
    let (notifications, total) = state
        .services
        .notifications
        .list(
            auth_user.user_id,
            query.unread_only.unwrap_or(false),
            page.offset(),
            page.limit(),
        )
        .await?;

    let notifications = notifications
        .into_iter()
        .map(NotificationResponse::from)
        .collect();
    Ok(ApiResponse::ok(
        "Notifications retrieved",
        PagedResponse::new(notifications, page, total),
    ))
}

/// GET /api/notifications/unread-count
#[utoipa::path(
    get,
    path = "/unread-count",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Unread count", body = ApiResponse<UnreadCountResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn unread_count(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<ApiResponse<UnreadCountResponse>> {
    let count = state
        .services
        .notifications
        .unread_count(auth_user.user_id)
        .await?;
    Ok(ApiResponse::ok(
        "Unread count retrieved",
        UnreadCountResponse { count },
    ))
}

/// PATCH /api/notifications/{id}/read
///
/// Marking an already read notification succeeds without changes.
#[utoipa::path(
    patch,
    path = "/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification read", body = ApiResponse<NotificationResponse>),
        (status = 403, description = "Not the recipient", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn mark_read(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<NotificationResponse>> {
    let notification = state
        .services
        .notifications
        .mark_read(id, auth_user.user_id)
        .await?;
    Ok(ApiResponse::ok("Notification marked as read", notification.into()))
}

/// POST /api/notifications/read-all
#[utoipa::path(
    post,
    path = "/read-all",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Number of notifications marked read", body = ApiResponse<ReadAllResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn mark_all_read(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<ApiResponse<ReadAllResponse>> {
    let updated = state
        .services
        .notifications
        .mark_all_read(auth_user.user_id)
        .await?;
    Ok(ApiResponse::ok(
        "All notifications marked as read",
        ReadAllResponse { updated },
    ))
}

/// DELETE /api/notifications/{id}
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = NOTIFICATION_TAG,
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted", body = ApiResponse<NoData>),
        (status = 403, description = "Not the recipient", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_notification(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<NoData>> {
    state
        .services
        .notifications
        .delete(id, auth_user.user_id)
        .await?;
    Ok(ApiResponse::message("Notification deleted"))
}
