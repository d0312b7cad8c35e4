//! Work post, matching and application handlers.

use axum::{
    Extension,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::WORK_POST_TAG;
use crate::api::dto::common::non_blank;
use crate::api::dto::{
    ApiResponse, ApplicationResponse, CreateApplicationRequest, CreateWorkPostRequest,
    ErrorResponse, MatchedWorkPostResponse, NoData, PagedResponse, PaginationParams,
    UpdateApplicationStatusRequest, UpdateWorkPostRequest, WorkPostListQuery, WorkPostResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::UserRole;
use crate::repositories::WorkPostFilter;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates work post routes.
///
/// Routes:
/// - GET /, POST /                                - Browse / publish posts
/// - GET /matching                                - Open posts matching my categories
/// - GET, PUT, DELETE /{id}                       - Read, update, delete a post
/// - POST /{id}/close                             - Stop accepting applications
/// - GET, POST /{id}/applications                 - Applications on a post / apply
/// - PATCH /{id}/applications/{application_id}    - Accept, reject or withdraw
pub fn work_post_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_work_posts, create_work_post))
        .routes(routes!(matching_work_posts))
        .routes(routes!(get_work_post, update_work_post, delete_work_post))
        .routes(routes!(close_work_post))
        .routes(routes!(list_applications, apply))
        .routes(routes!(update_application_status))
}

/// GET /api/work-posts - Browse work posts, newest first
#[utoipa::path(
    get,
    path = "/",
    tag = WORK_POST_TAG,
    params(PaginationParams, WorkPostListQuery),
    responses(
        (status = 200, description = "Paged work posts", body = ApiResponse<PagedResponse<WorkPostResponse>>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_work_posts(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
    ValidatedQuery(query): ValidatedQuery<WorkPostListQuery>,
) -> AppResult<ApiResponse<PagedResponse<WorkPostResponse>>> {
    let page = params.resolve(&state.pagination)?;
    let filter = WorkPostFilter {
        status: query.status,
        category: non_blank(query.category).map(|c| c.to_lowercase()),
        brand_id: query.brand_id,
    };

    let (posts, total) = state
        .services
        .work_posts
        .list(&filter, page.offset(), page.limit())
        .await?;

    let posts = posts.into_iter().map(WorkPostResponse::from).collect();
    Ok(ApiResponse::ok(
        "Work posts retrieved",
        PagedResponse::new(posts, page, total),
    ))
}

/// POST /api/work-posts - Publish a work post (brands and admins)
#[utoipa::path(
    post,
    path = "/",
    tag = WORK_POST_TAG,
    request_body = CreateWorkPostRequest,
    responses(
        (status = 201, description = "Work post created", body = ApiResponse<WorkPostResponse>),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 403, description = "Caller is not a brand", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_work_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateWorkPostRequest>,
) -> AppResult<ApiResponse<WorkPostResponse>> {
    auth_user.require_role(&[UserRole::Brand, UserRole::Admin])?;

    let new_post = payload.into_new_work_post(auth_user.user_id)?;
    let post = state.services.work_posts.create(new_post).await?;
    Ok(ApiResponse::created("Work post created", post.into()))
}

/// GET /api/work-posts/matching - Open posts ranked by shared categories (creators)
#[utoipa::path(
    get,
    path = "/matching",
    tag = WORK_POST_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Ranked open posts", body = ApiResponse<PagedResponse<MatchedWorkPostResponse>>),
        (status = 403, description = "Caller is not a creator", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn matching_work_posts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<ApiResponse<PagedResponse<MatchedWorkPostResponse>>> {
    auth_user.require_role(&[UserRole::Creator])?;
    let page = params.resolve(&state.pagination)?;

    let ranked = state.services.work_posts.matching(auth_user.user_id).await?;
    let matches = PagedResponse::from_vec(ranked, page).map(MatchedWorkPostResponse::from);
    Ok(ApiResponse::ok("Matching work posts retrieved", matches))
}

/// GET /api/work-posts/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = WORK_POST_TAG,
    params(("id" = i32, Path, description = "Work post ID")),
    responses(
        (status = 200, description = "Work post", body = ApiResponse<WorkPostResponse>),
        (status = 404, description = "Work post not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_work_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<WorkPostResponse>> {
    let post = state.services.work_posts.get(id).await?;
    Ok(ApiResponse::ok("Work post retrieved", post.into()))
}

/// PUT /api/work-posts/{id} - Update own post
#[utoipa::path(
    put,
    path = "/{id}",
    tag = WORK_POST_TAG,
    params(("id" = i32, Path, description = "Work post ID")),
    request_body = UpdateWorkPostRequest,
    responses(
        (status = 200, description = "Work post updated", body = ApiResponse<WorkPostResponse>),
        (status = 403, description = "Not the posting brand", body = ErrorResponse),
        (status = 404, description = "Work post not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_work_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateWorkPostRequest>,
) -> AppResult<ApiResponse<WorkPostResponse>> {
    let changes = payload.into_update_work_post()?;
    let post = state
        .services
        .work_posts
        .update(id, auth_user.user_id, changes)
        .await?;
    Ok(ApiResponse::ok("Work post updated", post.into()))
}

/// POST /api/work-posts/{id}/close - Close own post
#[utoipa::path(
    post,
    path = "/{id}/close",
    tag = WORK_POST_TAG,
    params(("id" = i32, Path, description = "Work post ID")),
    responses(
        (status = 200, description = "Work post closed", body = ApiResponse<WorkPostResponse>),
        (status = 403, description = "Not the posting brand", body = ErrorResponse),
        (status = 404, description = "Work post not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn close_work_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<WorkPostResponse>> {
    let post = state
        .services
        .work_posts
        .close(id, auth_user.user_id)
        .await?;
    Ok(ApiResponse::ok("Work post closed", post.into()))
}

/// DELETE /api/work-posts/{id} - Delete own post and its applications
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = WORK_POST_TAG,
    params(("id" = i32, Path, description = "Work post ID")),
    responses(
        (status = 200, description = "Work post deleted", body = ApiResponse<NoData>),
        (status = 403, description = "Not the posting brand", body = ErrorResponse),
        (status = 404, description = "Work post not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_work_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<NoData>> {
    state
        .services
        .work_posts
        .delete(id, auth_user.user_id)
        .await?;
    Ok(ApiResponse::message("Work post deleted"))
}

/// GET /api/work-posts/{id}/applications - Applications on own post
#[utoipa::path(
    get,
    path = "/{id}/applications",
    tag = WORK_POST_TAG,
    params(("id" = i32, Path, description = "Work post ID"), PaginationParams),
    responses(
        (status = 200, description = "Paged applications", body = ApiResponse<PagedResponse<ApplicationResponse>>),
        (status = 403, description = "Not the posting brand", body = ErrorResponse),
        (status = 404, description = "Work post not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_applications(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<ApiResponse<PagedResponse<ApplicationResponse>>> {
    let page = params.resolve(&state.pagination)?;
    let (applications, total) = state
        .services
        .work_posts
        .applications_for_post(id, auth_user.user_id, page.offset(), page.limit())
        .await?;

    let applications = applications
        .into_iter()
        .map(ApplicationResponse::from)
        .collect();
    Ok(ApiResponse::ok(
        "Applications retrieved",
        PagedResponse::new(applications, page, total),
    ))
}

/// POST /api/work-posts/{id}/applications - Apply to an open post (creators)
#[utoipa::path(
    post,
    path = "/{id}/applications",
    tag = WORK_POST_TAG,
    params(("id" = i32, Path, description = "Work post ID")),
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApiResponse<ApplicationResponse>),
        (status = 403, description = "Caller is not a creator", body = ErrorResponse),
        (status = 404, description = "Work post not found", body = ErrorResponse),
        (status = 409, description = "Already applied", body = ErrorResponse),
        (status = 422, description = "Post closed or own post", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn apply(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateApplicationRequest>,
) -> AppResult<ApiResponse<ApplicationResponse>> {
    auth_user.require_role(&[UserRole::Creator])?;

    let cover_letter = payload.cover_letter();
    let application = state
        .services
        .work_posts
        .apply(id, auth_user.user_id, cover_letter, payload.proposed_amount)
        .await?;
    Ok(ApiResponse::created("Application submitted", application.into()))
}

/// PATCH /api/work-posts/{id}/applications/{application_id}
///
/// The posting brand accepts or rejects; the applicant withdraws. Accepting
/// opens an accepted order.
#[utoipa::path(
    patch,
    path = "/{id}/applications/{application_id}",
    tag = WORK_POST_TAG,
    params(
        ("id" = i32, Path, description = "Work post ID"),
        ("application_id" = i32, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "Application updated", body = ApiResponse<ApplicationResponse>),
        (status = 403, description = "Not a party to the application", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 422, description = "Transition not allowed", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_application_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((id, application_id)): Path<(i32, i32)>,
    ValidatedJson(payload): ValidatedJson<UpdateApplicationStatusRequest>,
) -> AppResult<ApiResponse<ApplicationResponse>> {
    let application = state
        .services
        .work_posts
        .update_application_status(id, application_id, auth_user.user_id, payload.status)
        .await?;
    Ok(ApiResponse::ok(
        format!("Application {}", application.status.as_str()),
        application.into(),
    ))
}
