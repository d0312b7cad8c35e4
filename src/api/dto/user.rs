//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::common::{clearable, format_timestamp, validate_username};
use crate::error::{AppError, AppResult};
use crate::models::{UpdateUser, User, UserBadge, UserRole};
use crate::rules::{ProfileFields, RatingSummary, normalize_categories, profile_completion};

// ============================================================================
// Request DTOs
// ============================================================================

/// Partial profile update. Omitted fields stay untouched; a blank string
/// clears an optional field.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validate_username"))]
    #[schema(min_length = 3, max_length = 30)]
    pub username: Option<String>,
    #[validate(email(message = "Invalid email format"), length(max = 255))]
    #[schema(format = "email")]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    #[validate(length(max = 255))]
    pub website: Option<String>,
    #[validate(length(max = 100))]
    pub company_name: Option<String>,
    #[validate(length(max = 100))]
    pub instagram_handle: Option<String>,
    #[validate(length(max = 100))]
    pub youtube_handle: Option<String>,
    #[schema(example = json!(["fashion", "travel"]))]
    pub categories: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    pub fn into_update_user(self) -> AppResult<UpdateUser> {
        let categories = self
            .categories
            .map(|raw| normalize_categories(&raw))
            .transpose()
            .map_err(|reason| AppError::validation("categories", reason))?;

        Ok(UpdateUser {
            username: self.username.map(|u| u.trim().to_string()),
            email: self.email.map(|e| e.trim().to_lowercase()),
            full_name: clearable(self.full_name),
            bio: clearable(self.bio),
            avatar_url: clearable(self.avatar_url),
            phone: clearable(self.phone),
            location: clearable(self.location),
            website: clearable(self.website),
            company_name: clearable(self.company_name),
            instagram_handle: clearable(self.instagram_handle),
            youtube_handle: clearable(self.youtube_handle),
            categories,
        })
    }
}

/// Filters for the user directory.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    /// Users listing this category
    pub category: Option<String>,
    /// Case-insensitive match on username or full name
    #[validate(length(max = 100))]
    pub q: Option<String>,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// The caller's own profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfileResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub company_name: Option<String>,
    pub instagram_handle: Option<String>,
    pub youtube_handle: Option<String>,
    pub categories: Vec<String>,
    #[schema(example = "K3J9QZ2A")]
    pub referral_code: String,
    pub referred_by: Option<i32>,
    pub coins: i64,
    pub badge: UserBadge,
    #[schema(example = 65)]
    pub profile_completion: u8,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        let completion = profile_completion(&ProfileFields::from(&user));

        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            full_name: user.full_name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            phone: user.phone,
            location: user.location,
            website: user.website,
            company_name: user.company_name,
            instagram_handle: user.instagram_handle,
            youtube_handle: user.youtube_handle,
            categories: user.categories,
            referral_code: user.referral_code,
            referred_by: user.referred_by,
            coins: user.coins,
            badge: user.badge,
            profile_completion: completion.percentage,
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        }
    }
}

/// Compact user card used in lists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub categories: Vec<String>,
    pub badge: UserBadge,
    pub created_at: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            categories: user.categories,
            badge: user.badge,
            created_at: format_timestamp(user.created_at),
        }
    }
}

/// Profile as seen by other users; no email, phone or coin balance.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicProfileResponse {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub company_name: Option<String>,
    pub instagram_handle: Option<String>,
    pub youtube_handle: Option<String>,
    pub categories: Vec<String>,
    pub badge: UserBadge,
    pub rating: RatingSummary,
    pub created_at: String,
}

impl PublicProfileResponse {
    pub fn new(user: User, rating: RatingSummary) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            full_name: user.full_name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            location: user.location,
            website: user.website,
            company_name: user.company_name,
            instagram_handle: user.instagram_handle,
            youtube_handle: user.youtube_handle,
            categories: user.categories,
            badge: user.badge,
            rating,
            created_at: format_timestamp(user.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_validation() {
        let request = UpdateProfileRequest {
            username: Some("ab".to_string()),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_into_update_user_normalizes() {
        let request = UpdateProfileRequest {
            email: Some(" Ana@Example.COM ".to_string()),
            bio: Some("  ".to_string()),
            location: Some("Porto".to_string()),
            categories: Some(vec![" Travel".to_string(), "travel".to_string(), "Food".to_string()]),
            ..Default::default()
        };

        let update = request.into_update_user().unwrap();
        assert_eq!(update.email.as_deref(), Some("ana@example.com"));
        assert_eq!(update.bio, Some(None));
        assert_eq!(update.location, Some(Some("Porto".to_string())));
        assert_eq!(update.full_name, None);
        assert_eq!(
            update.categories,
            Some(vec!["travel".to_string(), "food".to_string()])
        );
    }

    #[test]
    fn test_too_many_categories_is_validation_error() {
        let request = UpdateProfileRequest {
            categories: Some((0..11).map(|i| format!("cat{i}")).collect()),
            ..Default::default()
        };
        assert!(matches!(
            request.into_update_user(),
            Err(AppError::Validation { field, .. }) if field == "categories"
        ));
    }

    #[test]
    fn test_profile_fields_fit_their_columns() {
        let request = UpdateProfileRequest {
            company_name: Some("c".repeat(101)),
            email: Some(format!("{}@example.com", "a".repeat(250))),
            username: Some("  ab ".to_string()),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("company_name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("username"));

        let request = UpdateProfileRequest {
            company_name: Some("c".repeat(100)),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }
}
