//! Dashboard handler.

use axum::{Extension, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::DASHBOARD_TAG;
use crate::api::dto::{ApiResponse, DashboardResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

pub fn dashboard_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_dashboard))
}

/// GET /api/dashboard - Orders, earnings, reputation and inbox at a glance
#[utoipa::path(
    get,
    path = "/",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Dashboard", body = ApiResponse<DashboardResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<ApiResponse<DashboardResponse>> {
    let dashboard = state.services.dashboard.build(auth_user.user_id).await?;
    Ok(ApiResponse::ok("Dashboard retrieved", dashboard.into()))
}
