//! Rating DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::PagedResponse;
use crate::api::dto::common::format_timestamp;
use crate::models::Rating;
use crate::rules::RatingSummary;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRatingRequest {
    #[validate(range(min = 1))]
    pub order_id: i32,
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    #[schema(minimum = 1, maximum = 5, example = 5)]
    pub score: i16,
    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingResponse {
    pub id: i32,
    pub order_id: i32,
    pub rater_id: i32,
    pub ratee_id: i32,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            order_id: rating.order_id,
            rater_id: rating.rater_id,
            ratee_id: rating.ratee_id,
            score: rating.score,
            comment: rating.comment,
            created_at: format_timestamp(rating.created_at),
        }
    }
}

/// Ratings a user received.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserRatingsResponse {
    pub summary: RatingSummary,
    pub ratings: PagedResponse<RatingResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        for (score, ok) in [(0, false), (1, true), (5, true), (6, false)] {
            let request = CreateRatingRequest {
                order_id: 1,
                score,
                comment: None,
            };
            assert_eq!(request.validate().is_ok(), ok, "score {score}");
        }
    }

    #[test]
    fn test_comment_length() {
        let request = CreateRatingRequest {
            order_id: 1,
            score: 4,
            comment: Some("x".repeat(1001)),
        };
        assert!(request.validate().is_err());
    }
}
