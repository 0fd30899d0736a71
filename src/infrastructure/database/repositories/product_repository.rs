use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use sea_orm::sea_query::{Expr, Func};

use super::db_err;
use crate::domain::product::{Product, ProductRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::product;

pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: product::Model) -> Product {
    Product {
        id: m.id,
        name: m.name,
        description: m.description,
        price: m.price,
        category: m.category,
        image_url: m.image_url,
        restaurant: m.restaurant,
        available: m.available,
    }
}

fn domain_to_active(p: &Product) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(p.id.clone()),
        name: Set(p.name.clone()),
        description: Set(p.description.clone()),
        price: Set(p.price),
        category: Set(p.category.clone()),
        image_url: Set(p.image_url.clone()),
        restaurant: Set(p.restaurant.clone()),
        available: Set(p.available),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_restaurant(&self, restaurant: &str) -> DomainResult<Vec<Product>> {
        let models = product::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(product::Column::Restaurant)))
                    .eq(restaurant.trim().to_lowercase()),
            )
            .order_by_asc(product::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Product>> {
        let model = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, p: &Product) -> DomainResult<()> {
        let exists = product::Entity::find_by_id(p.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        let active = domain_to_active(p);
        if exists {
            active.update(&self.db).await.map_err(db_err)?;
        } else {
            active.insert(&self.db).await.map_err(db_err)?;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> DomainResult<u64> {
        product::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
