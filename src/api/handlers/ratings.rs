//! Rating handlers. Received ratings are listed under `/api/users/{id}/ratings`.

use axum::{Extension, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::RATING_TAG;
use crate::api::dto::common::non_blank;
use crate::api::dto::{ApiResponse, CreateRatingRequest, ErrorResponse, RatingResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

pub fn rating_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(create_rating))
}

/// POST /api/ratings - Rate the other party of a completed order
#[utoipa::path(
    post,
    path = "/",
    tag = RATING_TAG,
    request_body = CreateRatingRequest,
    responses(
        (status = 201, description = "Rating created", body = ApiResponse<RatingResponse>),
        (status = 403, description = "Not a participant of the order", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order already rated by the caller", body = ErrorResponse),
        (status = 422, description = "Order is not completed", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_rating(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateRatingRequest>,
) -> AppResult<ApiResponse<RatingResponse>> {
    let rating = state
        .services
        .ratings
        .create(
            auth_user.user_id,
            payload.order_id,
            payload.score,
            non_blank(payload.comment),
        )
        .await?;
    Ok(ApiResponse::created("Rating submitted", rating.into()))
}
