use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use jiff_diesel::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::WorkPostStatus")]
#[serde(rename_all = "snake_case")]
pub enum WorkPostStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, DbEnum)]
#[db_enum(existing_type_path = "crate::schema::sql_types::ApplicationStatus")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::work_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkPost {
    pub id: i32,
    pub brand_id: i32,
    pub title: String,
    pub description: String,
    pub budget: BigDecimal,
    pub categories: Vec<String>,
    pub status: WorkPostStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::work_posts)]
pub struct NewWorkPost {
    pub brand_id: i32,
    pub title: String,
    pub description: String,
    pub budget: BigDecimal,
    pub categories: Vec<String>,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::work_posts)]
pub struct UpdateWorkPost {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<BigDecimal>,
    pub categories: Option<Vec<String>>,
    pub status: Option<WorkPostStatus>,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::work_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkApplication {
    pub id: i32,
    pub work_post_id: i32,
    pub creator_id: i32,
    pub cover_letter: Option<String>,
    pub proposed_amount: Option<BigDecimal>,
    pub status: ApplicationStatus,
    pub order_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::work_applications)]
pub struct NewWorkApplication {
    pub work_post_id: i32,
    pub creator_id: i32,
    pub cover_letter: Option<String>,
    pub proposed_amount: Option<BigDecimal>,
}
