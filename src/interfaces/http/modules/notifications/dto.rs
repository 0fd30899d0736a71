//! Notification DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Notification;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: String,
    pub restaurant_id: String,
    pub order_id: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total: i64,
    pub status: String,
    pub timestamp: i64,
    pub is_read: bool,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            restaurant_id: n.restaurant_id,
            order_id: n.order_id,
            customer_name: n.customer_name,
            customer_phone: n.customer_phone,
            total: n.total,
            status: n.status,
            timestamp: n.timestamp,
            is_read: n.is_read,
        }
    }
}

/// Inbox page: the listed notifications plus the restaurant's unread count
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInbox {
    pub notifications: Vec<NotificationDto>,
    pub unread_count: u64,
    /// Number of entries in `notifications`
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UnreadCount {
    pub count: u64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct InboxParams {
    #[serde(default)]
    pub unread_only: bool,
}
