//! Notification DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::common::format_timestamp;
use crate::models::{Notification, NotificationKind};

#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct NotificationListQuery {
    /// Only unread notifications
    pub unread_only: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    /// Id of the order, rating, application or group this is about
    pub reference_id: Option<i32>,
    pub is_read: bool,
    pub created_at: String,
    pub read_at: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            title: notification.title,
            body: notification.body,
            reference_id: notification.reference_id,
            is_read: notification.is_read,
            created_at: format_timestamp(notification.created_at),
            read_at: notification.read_at.map(format_timestamp),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    #[schema(example = 3)]
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadAllResponse {
    /// Notifications that changed from unread to read
    pub updated: usize,
}
