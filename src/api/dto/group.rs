//! Group DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::UserSummary;
use crate::api::dto::common::{clearable, format_timestamp, non_blank, validate_group_name};
use crate::models::{Group, GroupMember, NewGroup, UpdateGroup, User};
use crate::rules::RatingSummary;
use crate::services::{GroupDetail, GroupOverview};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGroupRequest {
    #[validate(custom(function = "validate_group_name"))]
    #[schema(example = "Summer campaign shortlist")]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl CreateGroupRequest {
    pub fn into_new_group(self, owner_id: i32) -> NewGroup {
        NewGroup {
            owner_id,
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateGroupRequest {
    #[validate(custom(function = "validate_group_name"))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl UpdateGroupRequest {
    pub fn into_update_group(self) -> UpdateGroup {
        UpdateGroup {
            name: self.name.map(|n| n.trim().to_string()),
            description: clearable(self.description),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddMemberRequest {
    #[validate(range(min = 1))]
    pub user_id: i32,
}

/// Group with its membership aggregate, as listed.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupResponse {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub member_count: i64,
    /// Mean over every rating the members received; null without ratings
    #[schema(example = 4.25)]
    pub average_rating: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl GroupResponse {
    pub fn new(group: Group, member_count: i64, average_rating: Option<f64>) -> Self {
        Self {
            id: group.id,
            owner_id: group.owner_id,
            name: group.name,
            description: group.description,
            member_count,
            average_rating,
            created_at: format_timestamp(group.created_at),
            updated_at: format_timestamp(group.updated_at),
        }
    }
}

impl From<GroupOverview> for GroupResponse {
    fn from(overview: GroupOverview) -> Self {
        let average = overview.ratings.average_or_none();
        Self::new(overview.group, overview.member_count, average)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupMemberResponse {
    pub user: UserSummary,
    pub rating: RatingSummary,
    pub added_at: String,
}

impl GroupMemberResponse {
    pub fn new(member: GroupMember, user: User, rating: RatingSummary) -> Self {
        Self {
            user: UserSummary::from(user),
            rating,
            added_at: format_timestamp(member.added_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupAggregate {
    pub member_count: i64,
    pub average_rating: Option<f64>,
    pub total_ratings: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupDetailResponse {
    pub group: GroupResponse,
    pub members: Vec<GroupMemberResponse>,
    pub aggregate: GroupAggregate,
}

impl From<GroupDetail> for GroupDetailResponse {
    fn from(detail: GroupDetail) -> Self {
        let ratings = detail.overview.ratings;
        let aggregate = GroupAggregate {
            member_count: detail.overview.member_count,
            average_rating: ratings.average_or_none(),
            total_ratings: ratings.count,
        };

        Self {
            group: GroupResponse::from(detail.overview),
            members: detail
                .members
                .into_iter()
                .map(|(member, user, rating)| GroupMemberResponse::new(member, user, rating))
                .collect(),
            aggregate,
        }
    }
}
