//! In-app notifications.
//!
//! Other services call [`NotificationService::notify`] as a side effect of
//! their own operation. Delivery is best effort: a failed insert is logged
//! and never fails the caller.

use crate::error::{AppError, AppResult};
use crate::models::{NewNotification, Notification};
use crate::repositories::NotificationRepository;

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository) -> Self {
        Self { repo }
    }

    pub async fn notify(&self, notification: NewNotification) {
        let user_id = notification.user_id;
        let kind = notification.kind;

        match self.repo.create(notification).await {
            Ok(created) => {
                tracing::debug!(user_id, notification_id = created.id, ?kind, "notification created")
            }
            Err(error) => {
                tracing::warn!(user_id, ?kind, error = %error, "failed to create notification")
            }
        }
    }

    pub async fn list(
        &self,
        user_id: i32,
        unread_only: bool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Notification>, i64)> {
        self.repo
            .list_for_user(user_id, unread_only, offset, limit)
            .await
    }

    pub async fn unread_count(&self, user_id: i32) -> AppResult<i64> {
        self.repo.count_unread(user_id).await
    }

    /// Fetches a notification and checks it belongs to `user_id`.
    async fn get_owned(&self, notification_id: i64, user_id: i32) -> AppResult<Notification> {
        let notification = self
            .repo
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::not_found("notification", "id", notification_id))?;

        if notification.user_id != user_id {
            return Err(AppError::forbidden("Access denied"));
        }
        Ok(notification)
    }

    /// Marking an already read notification returns it unchanged.
    pub async fn mark_read(&self, notification_id: i64, user_id: i32) -> AppResult<Notification> {
        let notification = self.get_owned(notification_id, user_id).await?;
        if notification.is_read {
            return Ok(notification);
        }

        match self.repo.mark_read(notification_id).await? {
            Some(updated) => Ok(updated),
            // Read concurrently between the two queries.
            None => self.get_owned(notification_id, user_id).await,
        }
    }

    pub async fn mark_all_read(&self, user_id: i32) -> AppResult<usize> {
        let updated = self.repo.mark_all_read(user_id).await?;
        tracing::debug!(user_id, updated, "notifications marked read");
        Ok(updated)
    }

    pub async fn delete(&self, notification_id: i64, user_id: i32) -> AppResult<()> {
        self.get_owned(notification_id, user_id).await?;
        self.repo.delete(notification_id).await?;
        Ok(())
    }
}
