//! Authentication handlers for registration, login and token refresh.

use axum::extract::State;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    ApiResponse, AuthResponse, ErrorResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    TokenResponse, UserProfileResponse,
};
use crate::error::AppResult;
use crate::services::Registration;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /register` - Create an account and get tokens
/// - `POST /login` - Authenticate and get tokens
/// - `POST /refresh` - Exchange a refresh token for a new pair
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(refresh_token))
}

/// POST /api/auth/register - Register new user
///
/// Creates the account, credits the signup and referral rewards and returns
/// a token pair.
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid data or unknown referral code", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse)
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let registration = Registration {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        role: payload.role,
        full_name: payload.full_name,
        referral_code: payload.referral_code,
    };

    let (user, tokens) = state.services.auth.register(registration).await?;

    Ok(ApiResponse::created(
        "Registration successful",
        AuthResponse {
            user: UserProfileResponse::from(user),
            tokens: tokens.into(),
        },
    ))
}

/// POST /api/auth/login - Authenticate user
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let (user, tokens) = state
        .services
        .auth
        .login(&payload.email, &payload.password)
        .await?;

    Ok(ApiResponse::ok(
        "Login successful",
        AuthResponse {
            user: UserProfileResponse::from(user),
            tokens: tokens.into(),
        },
    ))
}

/// POST /api/auth/refresh - Refresh access token
///
/// Only refresh tokens are accepted here.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse)
    )
)]
async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let tokens = state.services.auth.refresh(&payload.refresh_token).await?;
    Ok(ApiResponse::ok("Tokens refreshed", tokens.into()))
}
