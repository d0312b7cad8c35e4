//! User directory handlers.

use axum::extract::{Path, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::common::non_blank;
use crate::api::dto::{
    ApiResponse, ErrorResponse, PagedResponse, PaginationParams, PublicProfileResponse,
    RatingResponse, UserListQuery, UserRatingsResponse, UserSummary,
};
use crate::error::AppResult;
use crate::repositories::UserFilter;
use crate::state::AppState;
use crate::utils::validate::ValidatedQuery;

/// Creates user-related routes.
///
/// Routes:
/// - GET /              - Browse users
/// - GET /{id}          - Public profile
/// - GET /{id}/ratings  - Ratings the user received
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(get_user))
        .routes(routes!(list_user_ratings))
}

/// GET /api/users - Browse users, newest first
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    params(PaginationParams, UserListQuery),
    responses(
        (status = 200, description = "Paged users", body = ApiResponse<PagedResponse<UserSummary>>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(query): ValidatedQuery<UserListQuery>,
) -> AppResult<ApiResponse<PagedResponse<UserSummary>>> {
    let page = params.resolve(&state.pagination)?;
    let filter = UserFilter {
        role: query.role,
        category: non_blank(query.category).map(|c| c.to_lowercase()),
        search: non_blank(query.q),
    };

    let (users, total) = state
        .services
        .users
        .list(&filter, page.offset(), page.limit())
        .await?;

    let users = users.into_iter().map(UserSummary::from).collect();
    Ok(ApiResponse::ok(
        "Users retrieved",
        PagedResponse::new(users, page, total),
    ))
}

/// GET /api/users/{id} - Public profile with rating summary
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Public profile", body = ApiResponse<PublicProfileResponse>),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<PublicProfileResponse>> {
    let (user, summary) = state.services.users.public_profile(id).await?;
    Ok(ApiResponse::ok(
        "User retrieved",
        PublicProfileResponse::new(user, summary),
    ))
}

/// GET /api/users/{id}/ratings - Received ratings, newest first
#[utoipa::path(
    get,
    path = "/{id}/ratings",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID"), PaginationParams),
    responses(
        (status = 200, description = "Rating summary and paged ratings", body = ApiResponse<UserRatingsResponse>),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_user_ratings(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<ApiResponse<UserRatingsResponse>> {
    let page = params.resolve(&state.pagination)?;
    let (summary, ratings, total) = state
        .services
        .ratings
        .for_user(id, page.offset(), page.limit())
        .await?;

    let ratings = ratings.into_iter().map(RatingResponse::from).collect();
    Ok(ApiResponse::ok(
        "Ratings retrieved",
        UserRatingsResponse {
            summary,
            ratings: PagedResponse::new(ratings, page, total),
        },
    ))
}
