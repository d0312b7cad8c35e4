//! In-app notification persistence.

use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{NewNotification, Notification};
use crate::schema::notifications;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: AsyncDbPool,
}

impl NotificationRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_notification: NewNotification) -> AppResult<Notification> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(notifications::table)
            .values(&new_notification)
            .returning(Notification::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, notification_id: i64) -> AppResult<Option<Notification>> {
        let mut conn = self.pool.get().await?;

        notifications::table
            .find(notification_id)
            .select(Notification::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// The user's notifications, newest first.
    pub async fn list_for_user(
        &self,
        user_id: i32,
        unread_only: bool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Notification>, i64)> {
        let mut conn = self.pool.get().await?;

        let filtered = || {
            let query = notifications::table
                .filter(notifications::user_id.eq(user_id))
                .into_boxed();
            if unread_only {
                query.filter(notifications::is_read.eq(false))
            } else {
                query
            }
        };

        let total = filtered().count().get_result(&mut conn).await?;
        let items = filtered()
            .order(notifications::id.desc())
            .offset(offset)
            .limit(limit)
            .select(Notification::as_select())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }

    pub async fn count_unread(&self, user_id: i32) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Marks an unread notification as read. `None` if it was already read.
    pub async fn mark_read(&self, notification_id: i64) -> AppResult<Option<Notification>> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            notifications::table
                .find(notification_id)
                .filter(notifications::is_read.eq(false)),
        )
        .set((
            notifications::is_read.eq(true),
            notifications::read_at.eq(now.nullable()),
        ))
        .returning(Notification::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }

    /// Returns how many notifications changed.
    pub async fn mark_all_read(&self, user_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(user_id))
                .filter(notifications::is_read.eq(false)),
        )
        .set((
            notifications::is_read.eq(true),
            notifications::read_at.eq(now.nullable()),
        ))
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }

    pub async fn delete(&self, notification_id: i64) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(notifications::table.find(notification_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
