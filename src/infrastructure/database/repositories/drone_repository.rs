use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::warn;

use super::db_err;
use crate::domain::drone::{Drone, DroneRepository, DroneStatus, GeoPoint};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::drone;

pub struct SeaOrmDroneRepository {
    db: DatabaseConnection,
}

impl SeaOrmDroneRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: drone::Model) -> Drone {
    let status = DroneStatus::parse(&m.status).unwrap_or_else(|| {
        warn!(drone_id = %m.id, status = %m.status, "Unknown stored drone status, using Idle");
        DroneStatus::Idle
    });
    let position = match (m.lat, m.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
        _ => None,
    };

    let mut d = Drone::new(m.id, m.restaurant_id).restore(m.battery, m.current_order_id);
    d.drone_code = m.drone_code;
    d.restaurant_name = m.restaurant_name;
    d.status = status;
    d.position = position;
    d.speed_mps = m.speed_mps;
    d.updated_at = m.updated_at;
    d.last_maintenance = m.last_maintenance;
    d.flagged_for_issue = m.flagged_for_issue;
    d.issue_description = m.issue_description;
    d
}

fn domain_to_active(d: &Drone) -> drone::ActiveModel {
    drone::ActiveModel {
        id: Set(d.id.clone()),
        drone_code: Set(d.drone_code.clone()),
        restaurant_id: Set(d.restaurant_id.clone()),
        restaurant_name: Set(d.restaurant_name.clone()),
        status: Set(d.status.as_str().to_string()),
        battery: Set(d.battery()),
        current_order_id: Set(d.current_order_id().map(String::from)),
        lat: Set(d.position.map(|p| p.lat)),
        lng: Set(d.position.map(|p| p.lng)),
        speed_mps: Set(d.speed_mps),
        updated_at: Set(d.updated_at),
        last_maintenance: Set(d.last_maintenance),
        flagged_for_issue: Set(d.flagged_for_issue),
        issue_description: Set(d.issue_description.clone()),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl DroneRepository for SeaOrmDroneRepository {
    async fn find_all(&self) -> DomainResult<Vec<Drone>> {
        let models = drone::Entity::find()
            .order_by_asc(drone::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Drone>> {
        let model = drone::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_restaurant(&self, restaurant_id: &str) -> DomainResult<Vec<Drone>> {
        let models = drone::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(drone::Column::RestaurantId)))
                    .eq(restaurant_id.trim().to_lowercase()),
            )
            .order_by_asc(drone::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, d: &Drone) -> DomainResult<()> {
        let exists = drone::Entity::find_by_id(d.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        let active = domain_to_active(d);
        if exists {
            active.update(&self.db).await.map_err(db_err)?;
        } else {
            active.insert(&self.db).await.map_err(db_err)?;
        }
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        drone::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
