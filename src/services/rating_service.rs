//! Ratings left on completed orders.

use crate::error::{AppError, AppResult};
use crate::models::{NewNotification, NewRating, NotificationKind, OrderStatus, Rating};
use crate::repositories::{OrderRepository, RatingRepository};
use crate::rules::RatingSummary;
use crate::services::{NotificationService, UserService};

#[derive(Clone)]
pub struct RatingService {
    repo: RatingRepository,
    orders: OrderRepository,
    user_service: UserService,
    notifications: NotificationService,
}

impl RatingService {
    pub fn new(
        repo: RatingRepository,
        orders: OrderRepository,
        user_service: UserService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repo,
            orders,
            user_service,
            notifications,
        }
    }

    /// Rates the other party of a completed order. One rating per order
    /// and rater.
    pub async fn create(
        &self,
        rater_id: i32,
        order_id: i32,
        score: i16,
        comment: Option<String>,
    ) -> AppResult<Rating> {
        if !(1..=5).contains(&score) {
            return Err(AppError::validation("score", "Score must be between 1 and 5"));
        }

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("order", "id", order_id))?;
        if !order.is_participant(rater_id) {
            return Err(AppError::forbidden("You are not a participant of this order"));
        }
        if order.status != OrderStatus::Completed {
            return Err(AppError::unprocessable("Only completed orders can be rated"));
        }

        let ratee_id = order.counterpart_of(rater_id);
        let rating = self
            .repo
            .create(NewRating {
                order_id,
                rater_id,
                ratee_id,
                score,
                comment: comment
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
            })
            .await?;
        tracing::info!(rating_id = rating.id, order_id, rater_id, ratee_id, score, "rating created");

        self.notifications
            .notify(
                NewNotification::new(
                    ratee_id,
                    NotificationKind::RatingReceived,
                    "New rating",
                    format!("You received a {score}-star rating for \"{}\".", order.title),
                )
                .with_reference(rating.id),
            )
            .await;
        self.user_service.refresh_badge_quietly(ratee_id).await;

        Ok(rating)
    }

    /// Summary plus one page of the ratings `user_id` received.
    pub async fn for_user(
        &self,
        user_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(RatingSummary, Vec<Rating>, i64)> {
        self.user_service.get_user(user_id).await?;
        let summary = self.user_service.rating_summary(user_id).await?;
        let (ratings, total) = self.repo.list_for_ratee(user_id, offset, limit).await?;
        Ok((summary, ratings, total))
    }
}
