//! Notification API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{InboxParams, NotificationDto, NotificationInbox, UnreadCount};
use crate::application::NotificationService;
use crate::interfaces::http::common::{domain_error, ApiResult, MessageResponse};

#[derive(Clone)]
pub struct NotificationHandlerState {
    pub notifications: NotificationService,
}

async fn inbox(
    service: &NotificationService,
    restaurant_id: &str,
    unread_only: bool,
) -> ApiResult<Json<NotificationInbox>> {
    let notifications = service
        .list_by_restaurant(restaurant_id, unread_only)
        .await
        .map_err(domain_error)?;
    let unread_count = service
        .unread_count(restaurant_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(NotificationInbox {
        total: notifications.len(),
        notifications: notifications.into_iter().map(NotificationDto::from).collect(),
        unread_count,
    }))
}

#[utoipa::path(
    get,
    path = "/api/notifications/{restaurant_id}",
    tag = "Notifications",
    params(("restaurant_id" = String, Path, description = "Restaurant ID"), InboxParams),
    responses((status = 200, description = "Inbox, newest first", body = NotificationInbox))
)]
pub async fn get_inbox(
    State(state): State<NotificationHandlerState>,
    Path(restaurant_id): Path<String>,
    Query(params): Query<InboxParams>,
) -> ApiResult<Json<NotificationInbox>> {
    inbox(&state.notifications, &restaurant_id, params.unread_only).await
}

#[utoipa::path(
    get,
    path = "/api/notifications/restaurant/{restaurant_id}",
    tag = "Notifications",
    params(("restaurant_id" = String, Path, description = "Restaurant ID"), InboxParams),
    responses((status = 200, description = "Inbox, newest first", body = NotificationInbox))
)]
pub async fn get_restaurant_inbox(
    State(state): State<NotificationHandlerState>,
    Path(restaurant_id): Path<String>,
    Query(params): Query<InboxParams>,
) -> ApiResult<Json<NotificationInbox>> {
    inbox(&state.notifications, &restaurant_id, params.unread_only).await
}

#[utoipa::path(
    get,
    path = "/api/notifications/restaurant/{restaurant_id}/unread",
    tag = "Notifications",
    params(("restaurant_id" = String, Path, description = "Restaurant ID")),
    responses((status = 200, description = "Unread notifications", body = Vec<NotificationDto>))
)]
pub async fn get_unread(
    State(state): State<NotificationHandlerState>,
    Path(restaurant_id): Path<String>,
) -> ApiResult<Json<Vec<NotificationDto>>> {
    let notifications = state
        .notifications
        .list_by_restaurant(&restaurant_id, true)
        .await
        .map_err(domain_error)?;
    Ok(Json(notifications.into_iter().map(NotificationDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/notifications/restaurant/{restaurant_id}/count",
    tag = "Notifications",
    params(("restaurant_id" = String, Path, description = "Restaurant ID")),
    responses((status = 200, description = "Unread count", body = UnreadCount))
)]
pub async fn get_unread_count(
    State(state): State<NotificationHandlerState>,
    Path(restaurant_id): Path<String>,
) -> ApiResult<Json<UnreadCount>> {
    let count = state
        .notifications
        .unread_count(&restaurant_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(UnreadCount { count }))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = String, Path, description = "Notification ID")),
    responses((status = 200, description = "Marked as read; unknown ids are ignored", body = MessageResponse))
)]
pub async fn mark_read(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.notifications.mark_read(&id).await.map_err(domain_error)?;
    Ok(Json(MessageResponse::new("Notification marked as read")))
}
