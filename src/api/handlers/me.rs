//! Current user (me) endpoints.
//!
//! Everything here acts on the caller identified by the access token.

use axum::{Extension, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ME_TAG;
use crate::api::dto::{
    ApiResponse, ApplicationResponse, CoinOverviewResponse, CoinTransactionResponse,
    ErrorResponse, PagedResponse, PaginationParams, RedeemCoinsRequest, RedeemCoinsResponse,
    UpdateProfileRequest, UserProfileResponse, UserSummary,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::UserRole;
use crate::rules::Completion;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Creates the "me" routes (current authenticated user)
///
/// # Routes
/// - `GET /` and `PUT /` - Own profile
/// - `GET /completion` - Profile completion score
/// - `GET /coins` and `POST /coins/redeem` - Coin balance and ledger
/// - `GET /referrals` - Users who signed up with my code
/// - `GET /applications` - My work-post applications
pub fn me_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_me, update_me))
        .routes(routes!(get_completion))
        .routes(routes!(get_coins))
        .routes(routes!(redeem_coins))
        .routes(routes!(list_referrals))
        .routes(routes!(list_my_applications))
}

/// GET /api/me - Own profile
#[utoipa::path(
    get,
    path = "/",
    tag = ME_TAG,
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserProfileResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<ApiResponse<UserProfileResponse>> {
    let user = state.services.users.get_user(auth_user.user_id).await?;
    Ok(ApiResponse::ok("Profile retrieved", user.into()))
}

/// PUT /api/me - Partial profile update
///
/// Absent fields are left alone and blank strings clear optional fields.
#[utoipa::path(
    put,
    path = "/",
    tag = ME_TAG,
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserProfileResponse>),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<ApiResponse<UserProfileResponse>> {
    let changes = payload.into_update_user()?;
    let user = state
        .services
        .users
        .update_profile(auth_user.user_id, changes)
        .await?;
    Ok(ApiResponse::ok("Profile updated", user.into()))
}

/// GET /api/me/completion - Profile completion score
#[utoipa::path(
    get,
    path = "/completion",
    tag = ME_TAG,
    responses(
        (status = 200, description = "Completion percentage and missing fields", body = ApiResponse<Completion>)
    ),
    security(("bearerAuth" = []))
)]
async fn get_completion(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<ApiResponse<Completion>> {
    let completion = state.services.users.completion(auth_user.user_id).await?;
    Ok(ApiResponse::ok("Profile completion computed", completion))
}

/// GET /api/me/coins - Balance and ledger, newest first
#[utoipa::path(
    get,
    path = "/coins",
    tag = ME_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Coin overview", body = ApiResponse<CoinOverviewResponse>)
    ),
    security(("bearerAuth" = []))
)]
async fn get_coins(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<ApiResponse<CoinOverviewResponse>> {
    let page = params.resolve(&state.pagination)?;
    let (balance, transactions, total) = state
        .services
        .coins
        .overview(auth_user.user_id, page.offset(), page.limit())
        .await?;

    let transactions = transactions
        .into_iter()
        .map(CoinTransactionResponse::from)
        .collect();
    Ok(ApiResponse::ok(
        "Coin balance retrieved",
        CoinOverviewResponse {
            balance,
            transactions: PagedResponse::new(transactions, page, total),
        },
    ))
}

/// POST /api/me/coins/redeem - Spend coins
#[utoipa::path(
    post,
    path = "/coins/redeem",
    tag = ME_TAG,
    request_body = RedeemCoinsRequest,
    responses(
        (status = 200, description = "Coins redeemed", body = ApiResponse<RedeemCoinsResponse>),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 422, description = "Insufficient coin balance", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn redeem_coins(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<RedeemCoinsRequest>,
) -> AppResult<ApiResponse<RedeemCoinsResponse>> {
    let (balance, transaction) = state
        .services
        .coins
        .redeem(auth_user.user_id, payload.amount, payload.note())
        .await?;

    Ok(ApiResponse::ok(
        "Coins redeemed",
        RedeemCoinsResponse {
            balance,
            transaction: transaction.into(),
        },
    ))
}

/// GET /api/me/referrals - Users referred by me
#[utoipa::path(
    get,
    path = "/referrals",
    tag = ME_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Referred users", body = ApiResponse<PagedResponse<UserSummary>>)
    ),
    security(("bearerAuth" = []))
)]
async fn list_referrals(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<ApiResponse<PagedResponse<UserSummary>>> {
    let page = params.resolve(&state.pagination)?;
    let (users, total) = state
        .services
        .users
        .referrals(auth_user.user_id, page.offset(), page.limit())
        .await?;

    let users = users.into_iter().map(UserSummary::from).collect();
    Ok(ApiResponse::ok(
        "Referrals retrieved",
        PagedResponse::new(users, page, total),
    ))
}

/// GET /api/me/applications - My work-post applications (creators)
#[utoipa::path(
    get,
    path = "/applications",
    tag = ME_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "My applications", body = ApiResponse<PagedResponse<ApplicationResponse>>),
        (status = 403, description = "Not a creator", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_my_applications(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<ApiResponse<PagedResponse<ApplicationResponse>>> {
    auth_user.require_role(&[UserRole::Creator])?;
    let page = params.resolve(&state.pagination)?;

    let (applications, total) = state
        .services
        .work_posts
        .applications_for_creator(auth_user.user_id, page.offset(), page.limit())
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
