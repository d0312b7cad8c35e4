//! Work post and application DTOs.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::common::{
    format_timestamp, non_blank, validate_description, validate_money, validate_title,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ApplicationStatus, NewWorkPost, UpdateWorkPost, WorkApplication, WorkPost, WorkPostStatus,
};
use crate::rules::{Ranked, normalize_categories};

fn categories_or_error(raw: &[String]) -> AppResult<Vec<String>> {
    normalize_categories(raw).map_err(|reason| AppError::validation("categories", reason))
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateWorkPostRequest {
    #[validate(custom(function = "validate_title"))]
    #[schema(example = "UGC videos for a new energy drink")]
    pub title: String,
    #[validate(custom(function = "validate_description"))]
    pub description: String,
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "800.00")]
    pub budget: BigDecimal,
    #[serde(default)]
    #[schema(example = json!(["fitness", "food"]))]
    pub categories: Vec<String>,
}

impl CreateWorkPostRequest {
    pub fn into_new_work_post(self, brand_id: i32) -> AppResult<NewWorkPost> {
        Ok(NewWorkPost {
            brand_id,
            title: self.title.trim().to_string(),
            description: self.description,
            budget: self.budget,
            categories: categories_or_error(&self.categories)?,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateWorkPostRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_description"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<String>)]
    pub budget: Option<BigDecimal>,
    pub categories: Option<Vec<String>>,
}

impl UpdateWorkPostRequest {
    pub fn into_update_work_post(self) -> AppResult<UpdateWorkPost> {
        Ok(UpdateWorkPost {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description,
            budget: self.budget,
            categories: self
                .categories
                .map(|raw| categories_or_error(&raw))
                .transpose()?,
            status: None,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct WorkPostListQuery {
    pub status: Option<WorkPostStatus>,
    pub category: Option<String>,
    pub brand_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkPostResponse {
    pub id: i32,
    pub brand_id: i32,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, example = "800.00")]
    pub budget: BigDecimal,
    pub categories: Vec<String>,
    pub status: WorkPostStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<WorkPost> for WorkPostResponse {
    fn from(post: WorkPost) -> Self {
        Self {
            id: post.id,
            brand_id: post.brand_id,
            title: post.title,
            description: post.description,
            budget: post.budget,
            categories: post.categories,
            status: post.status,
            created_at: format_timestamp(post.created_at),
            updated_at: format_timestamp(post.updated_at),
        }
    }
}

/// An open post ranked against the caller's categories.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchedWorkPostResponse {
    #[serde(flatten)]
    pub post: WorkPostResponse,
    /// Number of shared categories
    #[schema(example = 2)]
    pub match_score: usize,
    pub matched_categories: Vec<String>,
}

impl From<Ranked<WorkPost>> for MatchedWorkPostResponse {
    fn from(ranked: Ranked<WorkPost>) -> Self {
        Self {
            post: WorkPostResponse::from(ranked.item),
            match_score: ranked.match_score,
            matched_categories: ranked.matched_categories,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct CreateApplicationRequest {
    #[validate(length(max = 5000))]
    pub cover_letter: Option<String>,
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<String>, example = "650.00")]
    pub proposed_amount: Option<BigDecimal>,
}

impl CreateApplicationRequest {
    pub fn cover_letter(&self) -> Option<String> {
        non_blank(self.cover_letter.clone())
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: i32,
    pub work_post_id: i32,
    pub creator_id: i32,
    pub cover_letter: Option<String>,
    #[schema(value_type = Option<String>)]
    pub proposed_amount: Option<BigDecimal>,
    pub status: ApplicationStatus,
    /// Order created when the application was accepted
    pub order_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<WorkApplication> for ApplicationResponse {
    fn from(application: WorkApplication) -> Self {
        Self {
            id: application.id,
            work_post_id: application.work_post_id,
            creator_id: application.creator_id,
            cover_letter: application.cover_letter,
            proposed_amount: application.proposed_amount,
            status: application.status,
            order_id: application.order_id,
            created_at: format_timestamp(application.created_at),
            updated_at: format_timestamp(application.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_normalizes_categories() {
        let request: CreateWorkPostRequest = serde_json::from_str(
            r#"{"title": "Reels", "description": "Two reels", "budget": 300, "categories": ["Food", " food ", "Travel"]}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());

        let post = request.into_new_work_post(2).unwrap();
        assert_eq!(post.categories, vec!["food", "travel"]);
        assert_eq!(post.brand_id, 2);
    }

    #[test]
    fn test_update_leaves_status_alone() {
        let update = UpdateWorkPostRequest {
            categories: Some(vec!["Art".to_string()]),
            ..Default::default()
        }
        .into_update_work_post()
        .unwrap();
        assert!(update.status.is_none());
        assert_eq!(update.categories, Some(vec!["art".to_string()]));
    }

    #[test]
    fn test_application_validation() {
        let request: CreateApplicationRequest =
            serde_json::from_str(r#"{"proposed_amount": "-10"}"#).unwrap();
        assert!(request.validate().is_err());

        let request: CreateApplicationRequest =
            serde_json::from_str(r#"{"cover_letter": "  "}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.cover_letter(), None);
    }

    #[test]
    fn test_status_request() {
        let request: UpdateApplicationStatusRequest =
            serde_json::from_str(r#"{"status": "withdrawn"}"#).unwrap();
        assert_eq!(request.status, ApplicationStatus::Withdrawn);
    }

    #[test]
    fn test_blank_title_and_description_rejected() {
        let request: CreateWorkPostRequest =
            serde_json::from_str(r#"{"title": "   ", "description": " \n "}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("description"));

        let update: UpdateWorkPostRequest =
            serde_json::from_str(r#"{"title": " ", "description": "  "}"#).unwrap();
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_money_fields_fit_numeric_column() {
        for budget in [r#""10000000000""#, r#""99.999""#] {
            let body = format!(r#"{{"title": "Reels", "description": "Two reels", "budget": {budget}}}"#);
            let request: CreateWorkPostRequest = serde_json::from_str(&body).unwrap();
            let errors = request.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("budget"), "{budget}");

            let update: UpdateWorkPostRequest =
                serde_json::from_str(&format!(r#"{{"budget": {budget}}}"#)).unwrap();
            assert!(update.validate().is_err(), "{budget}");

            let apply: CreateApplicationRequest =
                serde_json::from_str(&format!(r#"{{"proposed_amount": {budget}}}"#)).unwrap();
            assert!(apply.validate().is_err(), "{budget}");
        }

        let apply: CreateApplicationRequest =
            serde_json::from_str(r#"{"proposed_amount": "9999999999.99"}"#).unwrap();
        assert!(apply.validate().is_ok());
    }
}
