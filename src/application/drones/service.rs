//! Drone fleet service

use std::sync::Arc;

use tracing::info;

use crate::application::events::SharedEventBus;
use crate::domain::events::{DroneEvent, Event, DRONE_TOPIC};
use crate::domain::{DomainError, DomainResult, Drone, DronePatch, RepositoryProvider};
use crate::shared::time::now_millis;

#[derive(Clone)]
pub struct DroneService {
    repos: Arc<dyn RepositoryProvider>,
    events: SharedEventBus,
}

impl DroneService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, events: SharedEventBus) -> Self {
        Self { repos, events }
    }

    /// All drones, or those whose restaurant id or name matches
    /// `restaurant` (case-insensitive).
    pub async fn list(&self, restaurant: Option<&str>) -> DomainResult<Vec<Drone>> {
        let drones = self.repos.drones().find_all().await?;
        let Some(needle) = restaurant.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(drones);
        };
        Ok(drones
            .into_iter()
            .filter(|d| {
                d.restaurant_id.eq_ignore_ascii_case(needle)
                    || d
                        .restaurant_name
                        .as_deref()
                        .map(|n| n.eq_ignore_ascii_case(needle))
                        .unwrap_or(false)
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> DomainResult<Drone> {
        self.repos
            .drones()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Drone", id))
    }

    pub async fn patch(&self, id: &str, patch: DronePatch) -> DomainResult<Drone> {
        let mut drone = self.get(id).await?;
        patch.apply(&mut drone, now_millis())?;
        self.store(drone).await
    }

    /// Assign the drone to `order_id`. Fails with `Conflict` when it is
    /// already held for another order.
    pub async fn claim(&self, id: &str, order_id: &str) -> DomainResult<Drone> {
        let mut drone = self.get(id).await?;
        drone.acquire(order_id)?;
        drone.updated_at = Some(now_millis());
        info!(drone_id = id, order_id, "Drone claimed");
        self.store(drone).await
    }

    pub async fn release(&self, id: &str) -> DomainResult<Drone> {
        let mut drone = self.get(id).await?;
        if let Some(order_id) = drone.release() {
            info!(drone_id = id, order_id = %order_id, "Drone released");
        }
        drone.updated_at = Some(now_millis());
        self.store(drone).await
    }

    async fn store(&self, drone: Drone) -> DomainResult<Drone> {
        self.repos.drones().save(&drone).await?;
        self.events
            .publish(DRONE_TOPIC, Event::DroneUpdated(DroneEvent::from(&drone)));
        Ok(drone)
    }
}
