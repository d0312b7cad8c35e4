//! JWT authentication middleware.
//!
//! Validates bearer tokens and exposes the caller as [`AuthUser`].

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, AppResult};
use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Authenticated caller, added to request extensions by [`auth_middleware`]
/// and extracted in handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub username: String,
    pub role: UserRole,
}

impl AuthUser {
    /// Forbidden unless the caller holds one of `roles`.
    pub fn require_role(&self, roles: &[UserRole]) -> AppResult<()> {
        if roles.contains(&self.role) {
            return Ok(());
        }

        let allowed: Vec<&str> = roles.iter().map(UserRole::as_str).collect();
        Err(AppError::forbidden(format!(
            "This action requires the {} role",
            allowed.join(" or ")
        )))
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> AppResult<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            username: claims.username,
            role: claims.role,
        })
    }
}

/// JWT authentication middleware
///
/// Expects `Authorization: Bearer <token>` carrying an access token and
/// rejects the request with 401 otherwise.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
    })?;

    let claims = validate_access_token(token, &state.jwt_config.secret)?;
    let auth_user = AuthUser::try_from(claims)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;

    fn claims(sub: &str, role: UserRole) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "mia@example.com".to_string(),
            username: "mia".to_string(),
            role,
            token_type: TokenType::Access,
            iat: 0,
            exp: 9_999_999_999,
        }
    }

    #[test]
    fn test_auth_user_from_claims() {
        let user = AuthUser::try_from(claims("17", UserRole::Brand)).unwrap();
        assert_eq!(user.user_id, 17);
        assert_eq!(user.username, "mia");
        assert_eq!(user.role, UserRole::Brand);
    }

    #[test]
    fn test_auth_user_rejects_bad_subject() {
        let err = AuthUser::try_from(claims("abc", UserRole::Creator)).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_require_role() {
        let user = AuthUser::try_from(claims("3", UserRole::Creator)).unwrap();
        assert!(user.require_role(&[UserRole::Creator]).is_ok());

        match user.require_role(&[UserRole::Brand, UserRole::Admin]) {
            Err(AppError::Forbidden { message }) => {
                assert_eq!(message, "This action requires the brand or admin role")
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }
}
