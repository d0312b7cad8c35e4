use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use jiff_diesel::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account type. Admins cannot be created through registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::UserRole")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Creator,
    Brand,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Creator => "creator",
            UserRole::Brand => "brand",
            UserRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creator" => Ok(UserRole::Creator),
            "brand" => Ok(UserRole::Brand),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Reputation badge derived from completed orders and received ratings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, DbEnum,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::UserBadge")]
#[serde(rename_all = "snake_case")]
pub enum UserBadge {
    #[default]
    Newcomer,
    Rising,
    Trusted,
    TopRated,
}

impl UserBadge {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserBadge::Newcomer => "newcomer",
            UserBadge::Rising => "rising",
            UserBadge::Trusted => "trusted",
            UserBadge::TopRated => "top_rated",
        }
    }
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
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
    pub referral_code: String,
    pub referred_by: Option<i32>,
    pub coins: i64,
    pub badge: UserBadge,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub referral_code: String,
    pub referred_by: Option<i32>,
}

/// Profile changes. `Some(None)` clears a nullable column.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub company_name: Option<Option<String>>,
    pub instagram_handle: Option<Option<String>>,
    pub youtube_handle: Option<Option<String>>,
    pub categories: Option<Vec<String>>,
}
