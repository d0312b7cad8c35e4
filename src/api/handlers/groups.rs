//! Group handlers. Every route acts on the caller's own groups.

use axum::{
    Extension,
    extract::{Path, State},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::GROUP_TAG;
use crate::api::dto::{
    AddMemberRequest, ApiResponse, CreateGroupRequest, ErrorResponse, GroupDetailResponse,
    GroupMemberResponse, GroupResponse, NoData, PagedResponse, PaginationParams,
    UpdateGroupRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::rules::RatingSummary;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates group routes.
///
/// Routes:
/// - GET /, POST /                     - List / create my groups
/// - GET, PUT, DELETE /{id}            - Group detail, update, delete
/// - POST /{id}/members                - Add a member
/// - DELETE /{id}/members/{user_id}    - Remove a member
pub fn group_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_groups, create_group))
        .routes(routes!(get_group, update_group, delete_group))
        .routes(routes!(add_member))
        .routes(routes!(remove_member))
}

/// GET /api/groups - My groups with member count and average rating
#[utoipa::path(
    get,
    path = "/",
    tag = GROUP_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paged groups", body = ApiResponse<PagedResponse<GroupResponse>>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_groups(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<ApiResponse<PagedResponse<GroupResponse>>> {
    let page = params.resolve(&state.pagination)?;
    let (groups, total) = state
        .services
        .groups
        .list(auth_user.user_id, page.offset(), page.limit())
        .await?;

    let groups = groups.into_iter().map(GroupResponse::from).collect();
    Ok(ApiResponse::ok(
        "Groups retrieved",
        PagedResponse::new(groups, page, total),
    ))
}

/// POST /api/groups - Create a group
#[utoipa::path(
    post,
    path = "/",
    tag = GROUP_TAG,
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = ApiResponse<GroupResponse>),
        (status = 400, description = "Invalid data", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_group(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateGroupRequest>,
) -> AppResult<ApiResponse<GroupResponse>> {
    let group = state
        .services
        .groups
        .create(payload.into_new_group(auth_user.user_id))
        .await?;
    Ok(ApiResponse::created(
        "Group created",
        GroupResponse::new(group, 0, None),
    ))
}

/// GET /api/groups/{id} - Group with members and rating aggregate
#[utoipa::path(
    get,
    path = "/{id}",
    tag = GROUP_TAG,
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group detail", body = ApiResponse<GroupDetailResponse>),
        (status = 403, description = "Not the group owner", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_group(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<GroupDetailResponse>> {
    let detail = state.services.groups.detail(id, auth_user.user_id).await?;
    Ok(ApiResponse::ok("Group retrieved", detail.into()))
}

/// PUT /api/groups/{id} - Rename or re-describe a group
#[utoipa::path(
    put,
    path = "/{id}",
    tag = GROUP_TAG,
    params(("id" = i32, Path, description = "Group ID")),
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "Group updated", body = ApiResponse<GroupResponse>),
        (status = 403, description = "Not the group owner", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_group(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateGroupRequest>,
) -> AppResult<ApiResponse<GroupResponse>> {
    let overview = state
        .services
        .groups
        .update(id, auth_user.user_id, payload.into_update_group())
        .await?;
    Ok(ApiResponse::ok("Group updated", overview.into()))
}

/// DELETE /api/groups/{id} - Delete a group and its memberships
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = GROUP_TAG,
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group deleted", body = ApiResponse<NoData>),
        (status = 403, description = "Not the group owner", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_group(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<NoData>> {
    state.services.groups.delete(id, auth_user.user_id).await?;
    Ok(ApiResponse::message("Group deleted"))
}

/// POST /api/groups/{id}/members - Add a user to a group
#[utoipa::path(
    post,
    path = "/{id}/members",
    tag = GROUP_TAG,
    params(("id" = i32, Path, description = "Group ID")),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added", body = ApiResponse<GroupMemberResponse>),
        (status = 404, description = "Group or user not found", body = ErrorResponse),
        (status = 409, description = "Already a member", body = ErrorResponse),
        (status = 422, description = "Cannot add yourself", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn add_member(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AddMemberRequest>,
) -> AppResult<ApiResponse<GroupMemberResponse>> {
    let (member, user) = state
        .services
        .groups
        .add_member(id, auth_user.user_id, payload.user_id)
        .await?;
    let rating: RatingSummary = state.services.users.rating_summary(user.id).await?;

    Ok(ApiResponse::created(
        "Member added",
        GroupMemberResponse::new(member, user, rating),
    ))
}

/// DELETE /api/groups/{id}/members/{user_id} - Remove a member
#[utoipa::path(
    delete,
    path = "/{id}/members/{user_id}",
    tag = GROUP_TAG,
    params(
        ("id" = i32, Path, description = "Group ID"),
        ("user_id" = i32, Path, description = "Member user ID")
    ),
    responses(
        (status = 200, description = "Member removed", body = ApiResponse<NoData>),
        (status = 404, description = "Group not found or user is not a member", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn remove_member(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((id, user_id)): Path<(i32, i32)>,
) -> AppResult<ApiResponse<NoData>> {
    state
        .services
        .groups
        .remove_member(id, auth_user.user_id, user_id)
        .await?;
    Ok(ApiResponse::message("Member removed"))
}
