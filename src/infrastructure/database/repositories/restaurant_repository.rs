use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::restaurant::{Restaurant, RestaurantRepository, ThemeColors};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::restaurant;

pub struct SeaOrmRestaurantRepository {
    db: DatabaseConnection,
}

impl SeaOrmRestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: restaurant::Model) -> Restaurant {
    Restaurant {
        id: m.id,
        name: m.name,
        description: m.description,
        category: m.category,
        location: m.location,
        rating: m.rating,
        theme: ThemeColors {
            primary: m.theme_primary,
            secondary: m.theme_secondary,
            accent: m.theme_accent,
        },
        owner_id: m.owner_id,
        is_active: m.is_active,
        created_at: m.created_at,
    }
}

fn domain_to_active(r: &Restaurant) -> restaurant::ActiveModel {
    restaurant::ActiveModel {
        id: Set(r.id.clone()),
        name: Set(r.name.clone()),
        description: Set(r.description.clone()),
        category: Set(r.category.clone()),
        location: Set(r.location.clone()),
        rating: Set(r.rating),
        theme_primary: Set(r.theme.primary.clone()),
        theme_secondary: Set(r.theme.secondary.clone()),
        theme_accent: Set(r.theme.accent.clone()),
        owner_id: Set(r.owner_id.clone()),
        is_active: Set(r.is_active),
        created_at: Set(r.created_at),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl RestaurantRepository for SeaOrmRestaurantRepository {
    async fn find_all(&self) -> DomainResult<Vec<Restaurant>> {
        let models = restaurant::Entity::find()
            .order_by_asc(restaurant::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_active(&self) -> DomainResult<Vec<Restaurant>> {
        let models = restaurant::Entity::find()
            .filter(restaurant::Column::IsActive.eq(true))
            .order_by_asc(restaurant::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_category(&self, category: &str) -> DomainResult<Vec<Restaurant>> {
        let models = restaurant::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(restaurant::Column::Category)))
                    .eq(category.trim().to_lowercase()),
            )
            .order_by_asc(restaurant::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Restaurant>> {
        let model = restaurant::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_owner(&self, owner_id: &str) -> DomainResult<Option<Restaurant>> {
        let model = restaurant::Entity::find()
            .filter(restaurant::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, r: &Restaurant) -> DomainResult<()> {
        let exists = restaurant::Entity::find_by_id(r.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        let active = domain_to_active(r);
        if exists {
            active.update(&self.db).await.map_err(db_err)?;
        } else {
            active.insert(&self.db).await.map_err(db_err)?;
        }
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        restaurant::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::migrated_db;

    fn restaurant(id: &str, category: &str, active: bool) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            category: Some(category.to_string()),
            location: None,
            rating: 4.5,
            theme: ThemeColors::default(),
            owner_id: Some(format!("OWN-{}", id)),
            is_active: active,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn category_filter_ignores_case_and_active_filter_applies() {
        let repo = SeaOrmRestaurantRepository::new(migrated_db().await);
        repo.save(&restaurant("Aloha", "Fast Food", true)).await.unwrap();
        repo.save(&restaurant("SweetDreams", "Dessert", false)).await.unwrap();

        assert_eq!(repo.find_by_category("fast food").await.unwrap().len(), 1);
        let active = repo.find_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "Aloha");
    }

    #[tokio::test]
    async fn save_updates_and_owner_lookup_works() {
        let repo = SeaOrmRestaurantRepository::new(migrated_db().await);
        let mut r = restaurant("Aloha", "Fast Food", false);
        repo.save(&r).await.unwrap();
        r.is_active = true;
        repo.save(&r).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let found = repo.find_by_owner("OWN-Aloha").await.unwrap().unwrap();
        assert!(found.is_active);
        assert!(repo.find_by_owner("nobody").await.unwrap().is_none());
    }
}
