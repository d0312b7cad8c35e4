//! Per-user dashboard, assembled from sequential queries.

use bigdecimal::BigDecimal;

use crate::error::AppResult;
use crate::models::{OrderStatus, User, UserRole};
use crate::repositories::{NotificationRepository, OrderRepository, WorkPostRepository};
use crate::rules::RatingSummary;
use crate::services::UserService;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: User,
    pub order_counts: Vec<(OrderStatus, i64)>,
    pub completed_amount: BigDecimal,
    pub ratings: RatingSummary,
    pub unread_notifications: i64,
    pub open_work_posts: i64,
    pub pending_applications: i64,
}

#[derive(Clone)]
pub struct DashboardService {
    users: UserService,
    orders: OrderRepository,
    notifications: NotificationRepository,
    work_posts: WorkPostRepository,
}

impl DashboardService {
    pub fn new(
        users: UserService,
        orders: OrderRepository,
        notifications: NotificationRepository,
        work_posts: WorkPostRepository,
    ) -> Self {
        Self {
            users,
            orders,
            notifications,
            work_posts,
        }
    }

    pub async fn build(&self, user_id: i32) -> AppResult<Dashboard> {
        let user = self.users.get_user(user_id).await?;
        let order_counts = self.orders.status_counts(user_id).await?;
        let completed_amount = self.orders.completed_amount(user_id).await?;
        let ratings = self.users.rating_summary(user_id).await?;
        let unread_notifications = self.notifications.count_unread(user_id).await?;

        let (open_work_posts, pending_applications) = match user.role {
            UserRole::Creator => (0, self.work_posts.count_pending_for_creator(user_id).await?),
            UserRole::Brand | UserRole::Admin => (
                self.work_posts.count_open_by_brand(user_id).await?,
                self.work_posts.count_pending_for_brand(user_id).await?,
            ),
        };

        Ok(Dashboard {
            user,
            order_counts,
            completed_amount,
            ratings,
            unread_notifications,
            open_work_posts,
            pending_applications,
        })
    }
}
