//! Profiles, the user directory and badge bookkeeping.

use crate::error::{AppError, AppResult};
use crate::models::{UpdateUser, User, UserBadge};
use crate::repositories::{OrderRepository, RatingRepository, UserFilter, UserRepository};
use crate::rules::{BadgeInput, Completion, ProfileFields, RatingSummary, assign_badge, profile_completion};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
    orders: OrderRepository,
    ratings: RatingRepository,
}

impl UserService {
    pub fn new(repo: UserRepository, orders: OrderRepository, ratings: RatingRepository) -> Self {
        Self {
            repo,
            orders,
            ratings,
        }
    }

    /// Gets a user by id, or `NotFound`.
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }

    /// Applies a partial update. Username and email clashes surface as
    /// `Duplicate` from the unique constraints.
    pub async fn update_profile(&self, id: i32, changes: UpdateUser) -> AppResult<User> {
        self.get_user(id).await?;
        let user = self.repo.update(id, changes).await?;
        tracing::info!(user_id = id, "profile updated");
        Ok(user)
    }

    pub async fn completion(&self, id: i32) -> AppResult<Completion> {
        let user = self.get_user(id).await?;
        Ok(profile_completion(&ProfileFields::from(&user)))
    }

    pub async fn list(
        &self,
        filter: &UserFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, i64)> {
        self.repo.list(filter, offset, limit).await
    }

    pub async fn rating_summary(&self, user_id: i32) -> AppResult<RatingSummary> {
        let counts = self.ratings.score_counts(user_id).await?;
        Ok(RatingSummary::from_counts(counts))
    }

    /// A user together with the summary of ratings they received.
    pub async fn public_profile(&self, id: i32) -> AppResult<(User, RatingSummary)> {
        let user = self.get_user(id).await?;
        let summary = self.rating_summary(id).await?;
        Ok((user, summary))
    }

    pub async fn referrals(
        &self,
        referrer_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, i64)> {
        self.repo.list_referrals(referrer_id, offset, limit).await
    }

    /// Recomputes and stores the user's badge.
    pub async fn refresh_badge(&self, user_id: i32) -> AppResult<UserBadge> {
        let completed_orders = self.orders.count_completed(user_id).await?;
        let summary = self.rating_summary(user_id).await?;

        let badge = assign_badge(BadgeInput {
            completed_orders,
            rating_count: summary.count,
            average_rating: summary.average,
        });

        if self.repo.set_badge(user_id, badge).await? > 0 {
            tracing::info!(user_id, badge = badge.as_str(), "badge changed");
        }
        Ok(badge)
    }

    /// Like [`Self::refresh_badge`], for callers whose own write already
    /// succeeded; failures are logged.
    pub async fn refresh_badge_quietly(&self, user_id: i32) {
        if let Err(error) = self.refresh_badge(user_id).await {
            tracing::warn!(user_id, error = %error, "failed to refresh badge");
        }
    }
}
