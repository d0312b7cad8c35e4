//! Dashboard DTOs.

use bigdecimal::BigDecimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{OrderStatus, UserBadge, UserRole};
use crate::rules::{Completion, ProfileFields, RatingSummary, profile_completion};
use crate::services::Dashboard;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrdersByStatus {
    pub pending: i64,
    pub accepted: i64,
    pub rejected: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl OrdersByStatus {
    pub fn from_counts(counts: impl IntoIterator<Item = (OrderStatus, i64)>) -> Self {
        let mut result = Self::default();
        for (status, n) in counts {
            let slot = match status {
                OrderStatus::Pending => &mut result.pending,
                OrderStatus::Accepted => &mut result.accepted,
                OrderStatus::Rejected => &mut result.rejected,
                OrderStatus::Completed => &mut result.completed,
                OrderStatus::Cancelled => &mut result.cancelled,
            };
            *slot += n;
        }
        result
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub role: UserRole,
    pub orders_by_status: OrdersByStatus,
    /// Earned by a creator or spent by a brand on completed orders
    #[schema(value_type = String, example = "1250.00")]
    pub total_completed_amount: BigDecimal,
    pub rating: RatingSummary,
    pub badge: UserBadge,
    pub profile_completion: Completion,
    pub coin_balance: i64,
    pub unread_notifications: i64,
    /// Brands: own open posts
    pub open_work_posts: i64,
    /// Creators: own pending applications. Brands: pending applications on own posts
    pub pending_applications: i64,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        let user = dashboard.user;
        Self {
            role: user.role,
            orders_by_status: OrdersByStatus::from_counts(dashboard.order_counts),
            total_completed_amount: dashboard.completed_amount,
            rating: dashboard.ratings,
            badge: user.badge,
            profile_completion: profile_completion(&ProfileFields::from(&user)),
            coin_balance: user.coins,
            unread_notifications: dashboard.unread_notifications,
            open_work_posts: dashboard.open_work_posts,
            pending_applications: dashboard.pending_applications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_status() {
        let counts = OrdersByStatus::from_counts([
            (OrderStatus::Pending, 2),
            (OrderStatus::Completed, 5),
            (OrderStatus::Cancelled, 1),
        ]);
        assert_eq!(
            counts,
            OrdersByStatus {
                pending: 2,
                accepted: 0,
                rejected: 0,
                completed: 5,
                cancelled: 1,
            }
        );
        assert_eq!(
            serde_json::to_value(counts).unwrap()["completed"],
            serde_json::json!(5)
        );
    }
}
