//! Drone DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Drone, GeoPoint};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PositionDto {
    pub lat: f64,
    pub lng: f64,
}

impl From<GeoPoint> for PositionDto {
    fn from(p: GeoPoint) -> Self {
        Self { lat: p.lat, lng: p.lng }
    }
}

/// Drone as consumed by the tracking map.
///
/// `status` is the client label (`delivering` or `returning`); the internal
/// status is exposed as `fleetStatus`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DroneDto {
    pub id: String,
    pub name: String,
    pub drone_code: String,
    pub restaurant_id: String,
    pub restaurant: String,
    pub restaurant_name: Option<String>,
    pub status: String,
    pub fleet_status: String,
    pub battery: i32,
    pub battery_level: i32,
    pub current_order_id: Option<String>,
    pub position: PositionDto,
    pub waypoints: Vec<PositionDto>,
    pub speed_mps: f64,
    pub updated_at: Option<i64>,
    pub last_maintenance: Option<i64>,
    pub flagged_for_issue: bool,
    pub issue_description: Option<String>,
}

impl From<Drone> for DroneDto {
    fn from(d: Drone) -> Self {
        let code = d.drone_code.clone().unwrap_or_else(|| d.id.clone());
        Self {
            name: code.clone(),
            drone_code: code,
            restaurant: d.restaurant_id.clone(),
            status: d.status.client_label().to_string(),
            fleet_status: d.status.as_str().to_string(),
            battery: d.battery(),
            battery_level: d.battery(),
            current_order_id: d.current_order_id().map(String::from),
            position: d.position_or_default().into(),
            waypoints: Vec::new(),
            id: d.id,
            restaurant_id: d.restaurant_id,
            restaurant_name: d.restaurant_name,
            speed_mps: d.speed_mps,
            updated_at: d.updated_at,
            last_maintenance: d.last_maintenance,
            flagged_for_issue: d.flagged_for_issue,
            issue_description: d.issue_description,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DroneListParams {
    pub restaurant_id: Option<String>,
    /// Restaurant id or name; used when `restaurantId` is absent
    pub restaurant: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClaimDroneRequest {
    #[validate(length(min = 1, message = "orderId is required"))]
    pub order_id: String,
}
