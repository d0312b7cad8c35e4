//! Registration, login and token refresh.

use crate::config::{JwtConfig, RewardsConfig};
use crate::error::{AppError, AppResult};
use crate::models::{NewNotification, NewUser, NotificationKind, User, UserRole};
use crate::repositories::UserRepository;
use crate::rules::coins::{generate_referral_code, normalize_referral_code};
use crate::services::NotificationService;
use crate::utils::jwt::{Subject, TokenPair, generate_token_pair, validate_refresh_token};
use crate::utils::password::{hash_password, verify_password};

const REFERRAL_CODE_ATTEMPTS: usize = 5;
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// What a new account is created from.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub referral_code: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    notifications: NotificationService,
    jwt: JwtConfig,
    rewards: RewardsConfig,
}

impl AuthService {
    pub fn new(
        users: UserRepository,
        notifications: NotificationService,
        jwt: JwtConfig,
        rewards: RewardsConfig,
    ) -> Self {
        Self {
            users,
            notifications,
            jwt,
            rewards,
        }
    }

    /// Creates the account, books the signup rewards and issues tokens.
    pub async fn register(&self, registration: Registration) -> AppResult<(User, TokenPair)> {
        if registration.role == UserRole::Admin {
            return Err(AppError::validation(
                "role",
                "Only creator or brand accounts can be registered",
            ));
        }

        let referrer = match registration
            .referral_code
            .as_deref()
            .map(normalize_referral_code)
            .filter(|code| !code.is_empty())
        {
            Some(code) => Some(
                self.users
                    .find_by_referral_code(&code)
                    .await?
                    .ok_or_else(|| AppError::bad_request("Unknown referral code"))?,
            ),
            None => None,
        };

        let new_user = NewUser {
            username: registration.username.trim().to_string(),
            email: registration.email.trim().to_lowercase(),
            password_hash: hash_password(&registration.password)?,
            role: registration.role,
            full_name: registration
                .full_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            referral_code: self.unique_referral_code().await?,
            referred_by: referrer.as_ref().map(|r| r.id),
        };

        let user = self.users.create_with_rewards(new_user, self.rewards).await?;
        tracing::info!(
            user_id = user.id,
            role = user.role.as_str(),
            referred_by = ?user.referred_by,
            "user registered"
        );

        if let Some(referrer) = referrer {
            self.notifications
                .notify(
                    NewNotification::new(
                        referrer.id,
                        NotificationKind::ReferralReward,
                        "Referral reward",
                        format!(
                            "{} joined with your referral code. {} coins were added to your balance.",
                            user.username, self.rewards.referral_bonus
                        ),
                    )
                    .with_reference(user.id),
                )
                .await;
        }

        let tokens = generate_token_pair(&Subject::from(&user), &self.jwt)?;
        Ok((user, tokens))
    }

    /// Both an unknown email and a wrong password answer with the same 401.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "login rejected");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let tokens = generate_token_pair(&Subject::from(&user), &self.jwt)?;
        tracing::info!(user_id = user.id, "user logged in");
        Ok((user, tokens))
    }

    /// Exchanges a refresh token for a new pair. Access tokens are refused.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = validate_refresh_token(refresh_token, &self.jwt.secret)?;
        let user = self
            .users
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        generate_token_pair(&Subject::from(&user), &self.jwt)
    }

    async fn unique_referral_code(&self) -> AppResult<String> {
        for _ in 0..REFERRAL_CODE_ATTEMPTS {
            let code = generate_referral_code();
            if !self.users.referral_code_exists(&code).await? {
                return Ok(code);
            }
        }
        Err(AppError::Internal {
            source: anyhow::anyhow!(
                "no free referral code after {REFERRAL_CODE_ATTEMPTS} attempts"
            ),
        })
    }
}
