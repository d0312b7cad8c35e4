use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{User, UserRole};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived, accepted on protected routes
    Access,
    /// Long-lived, only accepted by the refresh endpoint
    Refresh,
}

/// Identity carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub user_id: i32,
    pub email: String,
    pub username: String,
    pub role: UserRole,
}

impl From<&User> for Subject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: &Subject, token_type: TokenType, expiration_hours: i64) -> Self {
        let now = jiff::Timestamp::now().as_second();

        Self {
            sub: subject.user_id.to_string(),
            email: subject.email.clone(),
            username: subject.username.clone(),
            role: subject.role,
            token_type,
            iat: now,
            exp: now + expiration_hours * 3600,
        }
    }

    pub fn user_id(&self) -> AppResult<i32> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

pub fn generate_token(
    subject: &Subject,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(subject, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {e}"),
    })
}

pub fn generate_token_pair(subject: &Subject, config: &JwtConfig) -> AppResult<TokenPair> {
    Ok(TokenPair {
        access_token: generate_token(
            subject,
            TokenType::Access,
            &config.secret,
            config.access_token_expiration,
        )?,
        refresh_token: generate_token(
            subject,
            TokenType::Refresh,
            &config.secret,
            config.refresh_token_expiration,
        )?,
        expires_in: config.access_token_expiration * 3600,
    })
}

/// Decodes and verifies a token, optionally requiring a token type.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::unauthorized("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::unauthorized("Invalid token signature")
        }
        _ => AppError::unauthorized("Invalid token"),
    })?;

    if let Some(expected) = expected_type
        && claims.token_type != expected
    {
        return Err(AppError::unauthorized(format!(
            "Invalid token type: expected {expected:?}, got {:?}",
            claims.token_type
        )));
    }

    Ok(claims)
}

pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

    fn subject() -> Subject {
        Subject {
            user_id: 42,
            email: "brand@example.com".to_string(),
            username: "acme".to_string(),
            role: UserRole::Brand,
        }
    }

    fn unauthorized_message(result: AppResult<Claims>) -> String {
        match result {
            Err(AppError::Unauthorized { message }) => message,
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn test_claims_expiration() {
        let claims = Claims::new(&subject(), TokenType::Access, 2);
        assert_eq!(claims.exp - claims.iat, 7200);
        assert_eq!(claims.user_id().unwrap(), 42);
    }

    #[test]
    fn test_round_trip_keeps_role() {
        let token = generate_token(&subject(), TokenType::Access, SECRET, 1).unwrap();
        let claims = validate_access_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, UserRole::Brand);
        assert_eq!(claims.username, "acme");
    }

    #[test]
    fn test_token_pair_types() {
        let config = JwtConfig {
            secret: SECRET.to_string(),
            access_token_expiration: 1,
            refresh_token_expiration: 24,
        };
        let pair = generate_token_pair(&subject(), &config).unwrap();
        assert_eq!(pair.expires_in, 3600);

        assert!(validate_access_token(&pair.access_token, SECRET).is_ok());
        assert!(validate_refresh_token(&pair.refresh_token, SECRET).is_ok());

        let message = unauthorized_message(validate_access_token(&pair.refresh_token, SECRET));
        assert!(message.contains("Invalid token type"));
        assert!(validate_refresh_token(&pair.access_token, SECRET).is_err());
    }

    #[test]
    fn test_expired_token() {
        let token = generate_token(&subject(), TokenType::Access, SECRET, -2).unwrap();
        assert_eq!(
            unauthorized_message(validate_access_token(&token, SECRET)),
            "Token has expired"
        );
    }

    #[test]
    fn test_wrong_secret() {
        let token = generate_token(&subject(), TokenType::Access, SECRET, 1).unwrap();
        let result = validate_access_token(&token, "another-secret-key-of-sufficient-len");
        assert_eq!(unauthorized_message(result), "Invalid token signature");
    }

    #[test]
    fn test_garbage_token() {
        assert_eq!(
            unauthorized_message(validate_access_token("not.a.jwt", SECRET)),
            "Invalid token"
        );
    }

    #[test]
    fn test_non_numeric_subject() {
        let mut claims = Claims::new(&subject(), TokenType::Access, 1);
        claims.sub = "abc".into();
        assert!(matches!(claims.user_id(), Err(AppError::Unauthorized { .. })));
    }
}
