//! Drone domain entity

use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::errors::DomainError;

/// Fallback position used when a drone has never reported one.
pub const DEFAULT_POSITION: GeoPoint = GeoPoint {
    lat: 10.762622,
    lng: 106.660172,
};

/// Internal drone status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DroneStatus {
    #[default]
    Idle,
    Delivering,
    Charging,
    Maintenance,
}

impl DroneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DroneStatus::Idle => "Idle",
            DroneStatus::Delivering => "Delivering",
            DroneStatus::Charging => "Charging",
            DroneStatus::Maintenance => "Maintenance",
        }
    }

    /// Case-insensitive parse of the internal names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "idle" => Some(DroneStatus::Idle),
            "delivering" => Some(DroneStatus::Delivering),
            "charging" => Some(DroneStatus::Charging),
            "maintenance" => Some(DroneStatus::Maintenance),
            _ => None,
        }
    }

    /// Parse a status sent by a tracking client. `arrived` and `returning`
    /// both mean the drone is free again.
    pub fn from_client(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "arrived" | "returning" => Some(DroneStatus::Idle),
            _ => DroneStatus::parse(raw),
        }
    }

    /// Status as reported to tracking clients: only `delivering` or
    /// `returning`.
    pub fn client_label(&self) -> &'static str {
        match self {
            DroneStatus::Delivering => "delivering",
            _ => "returning",
        }
    }
}

impl std::fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Clamp a battery reading into `0..=100`.
pub fn clamp_battery(value: i32) -> i32 {
    value.clamp(0, 100)
}

/// Delivery drone
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    pub id: String,
    pub drone_code: Option<String>,
    pub restaurant_id: String,
    pub restaurant_name: Option<String>,
    pub status: DroneStatus,
    battery: i32,
    current_order_id: Option<String>,
    pub position: Option<GeoPoint>,
    pub speed_mps: f64,
    pub updated_at: Option<i64>,
    pub last_maintenance: Option<i64>,
    pub flagged_for_issue: bool,
    pub issue_description: Option<String>,
}

impl Drone {
    pub fn new(id: impl Into<String>, restaurant_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            drone_code: None,
            restaurant_id: restaurant_id.into(),
            restaurant_name: None,
            status: DroneStatus::Idle,
            battery: 100,
            current_order_id: None,
            position: None,
            speed_mps: 0.0,
            updated_at: None,
            last_maintenance: None,
            flagged_for_issue: false,
            issue_description: None,
        }
    }

    pub fn battery(&self) -> i32 {
        self.battery
    }

    pub fn set_battery(&mut self, value: i32) {
        self.battery = clamp_battery(value);
    }

    pub fn position_or_default(&self) -> GeoPoint {
        self.position.unwrap_or(DEFAULT_POSITION)
    }

    pub fn current_order_id(&self) -> Option<&str> {
        self.current_order_id.as_deref()
    }

    /// Claim this drone for `order_id`. Re-claiming for the same order is a
    /// no-op; a drone held for another order is a `Conflict`.
    pub fn acquire(&mut self, order_id: &str) -> Result<(), DomainError> {
        match self.current_order_id.as_deref() {
            Some(held) if held != order_id => Err(DomainError::Conflict(format!(
                "Drone {} is assigned to order {}",
                self.id, held
            ))),
            _ => {
                self.current_order_id = Some(order_id.to_string());
                Ok(())
            }
        }
    }

    /// Drop the current claim, returning the order it was held for.
    pub fn release(&mut self) -> Option<String> {
        self.current_order_id.take()
    }

    /// Rehydrate a drone from storage without running the claim rules.
    pub fn restore(mut self, battery: i32, current_order_id: Option<String>) -> Self {
        self.battery = clamp_battery(battery);
        self.current_order_id = current_order_id;
        self
    }
}

// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial drone update sent by dashboards and tracking clients
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DronePatch {
    pub status: Option<String>,
    pub battery: Option<i32>,
    pub battery_level: Option<i32>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub current_order_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub order_id: Option<Option<String>>,
    pub drone_code: Option<String>,
    pub position: Option<GeoPoint>,
    pub speed_mps: Option<f64>,
    pub updated_at: Option<i64>,
    pub restaurant_id: Option<String>,
    pub restaurant_name: Option<String>,
    pub last_maintenance: Option<i64>,
    pub flagged_for_issue: Option<bool>,
    pub issue_description: Option<String>,
}

impl DronePatch {
    /// Apply every present field. The status is validated before anything
    /// is written, so a rejected patch leaves the drone unchanged.
    pub fn apply(self, drone: &mut Drone, now: i64) -> Result<(), DomainError> {
        let status = match self.status.as_deref() {
            Some(raw) => Some(DroneStatus::from_client(raw).ok_or_else(|| {
                DomainError::Validation(format!("Invalid drone status: {}", raw))
            })?),
            None => None,
        };

        let assignment = self.current_order_id.or(self.order_id);
        if let Some(Some(order_id)) = &assignment {
            drone.acquire(order_id)?;
        }
        if let Some(None) = assignment {
            drone.release();
        }

        if let Some(status) = status {
            drone.status = status;
        }
        if let Some(b) = self.battery {
            drone.set_battery(b);
        }
        if let Some(b) = self.battery_level {
            drone.set_battery(b);
        }
        if let Some(v) = self.drone_code {
            drone.drone_code = Some(v);
        }
        if let Some(v) = self.position {
            drone.position = Some(v);
        }
        if let Some(v) = self.speed_mps {
            drone.speed_mps = v;
        }
        if let Some(v) = self.restaurant_id {
            drone.restaurant_id = v;
        }
        if let Some(v) = self.restaurant_name {
            drone.restaurant_name = Some(v);
        }
        if let Some(v) = self.last_maintenance {
            drone.last_maintenance = Some(v);
        }
        if let Some(v) = self.flagged_for_issue {
            drone.flagged_for_issue = v;
        }
        if let Some(v) = self.issue_description {
            drone.issue_description = Some(v);
        }
        drone.updated_at = Some(self.updated_at.unwrap_or(now));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(json: &str) -> DronePatch {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn battery_is_clamped() {
        let mut drone = Drone::new("D1", "R1");
        patch(r#"{"battery": 150}"#).apply(&mut drone, 1).unwrap();
        assert_eq!(drone.battery(), 100);
        patch(r#"{"batteryLevel": -10}"#).apply(&mut drone, 2).unwrap();
        assert_eq!(drone.battery(), 0);
    }

    #[test]
    fn client_status_aliases() {
        assert_eq!(DroneStatus::from_client("delivering"), Some(DroneStatus::Delivering));
        assert_eq!(DroneStatus::from_client("arrived"), Some(DroneStatus::Idle));
        assert_eq!(DroneStatus::from_client("Returning"), Some(DroneStatus::Idle));
        assert_eq!(DroneStatus::from_client("CHARGING"), Some(DroneStatus::Charging));
        assert_eq!(DroneStatus::from_client("flying"), None);
    }

    #[test]
    fn client_label_collapses_to_two_states() {
        assert_eq!(DroneStatus::Delivering.client_label(), "delivering");
        assert_eq!(DroneStatus::Idle.client_label(), "returning");
        assert_eq!(DroneStatus::Maintenance.client_label(), "returning");
    }

    #[test]
    fn invalid_status_leaves_drone_untouched() {
        let mut drone = Drone::new("D1", "R1");
        let before = drone.clone();
        let result = patch(r#"{"status": "teleporting", "battery": 5}"#).apply(&mut drone, 1);
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(drone, before);
    }

    #[test]
    fn acquire_is_exclusive() {
        let mut drone = Drone::new("D1", "R1");
        drone.acquire("O1").unwrap();
        drone.acquire("O1").unwrap();
        assert!(matches!(drone.acquire("O2"), Err(DomainError::Conflict(_))));
        assert_eq!(drone.release().as_deref(), Some("O1"));
        drone.acquire("O2").unwrap();
        assert_eq!(drone.current_order_id(), Some("O2"));
    }

    #[test]
    fn patch_null_order_releases_claim() {
        let mut drone = Drone::new("D1", "R1");
        drone.acquire("O1").unwrap();
        patch(r#"{"orderId": null}"#).apply(&mut drone, 1).unwrap();
        assert_eq!(drone.current_order_id(), None);
    }

    #[test]
    fn patch_without_order_keys_keeps_claim() {
        let mut drone = Drone::new("D1", "R1");
        drone.acquire("O1").unwrap();
        patch(r#"{"status": "delivering", "position": {"lat": 1.5, "lng": 2.5}}"#)
            .apply(&mut drone, 7)
            .unwrap();
        assert_eq!(drone.current_order_id(), Some("O1"));
        assert_eq!(drone.status, DroneStatus::Delivering);
        assert_eq!(drone.position_or_default(), GeoPoint { lat: 1.5, lng: 2.5 });
        assert_eq!(drone.updated_at, Some(7));
    }

    #[test]
    fn default_position_when_unset() {
        let drone = Drone::new("D1", "R1");
        assert_eq!(drone.position_or_default(), DEFAULT_POSITION);
    }

    #[test]
    fn unknown_patch_key_is_rejected() {
        assert!(serde_json::from_str::<DronePatch>(r#"{"altitude": 120}"#).is_err());
    }
}
