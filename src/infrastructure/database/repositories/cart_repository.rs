use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};

use super::db_err;
use crate::domain::cart::{CartItem, CartRepository, NewCartItem};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::cart_item;

pub struct SeaOrmCartRepository {
    db: DatabaseConnection,
}

impl SeaOrmCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: cart_item::Model) -> CartItem {
    CartItem {
        id: m.id,
        product_id: m.product_id,
        product_name: m.product_name,
        unit_price: m.unit_price,
        quantity: m.quantity,
        restaurant_code: m.restaurant_code,
    }
}

#[async_trait]
impl CartRepository for SeaOrmCartRepository {
    async fn find_all(&self) -> DomainResult<Vec<CartItem>> {
        let models = cart_item::Entity::find()
            .order_by_asc(cart_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn add(&self, item: NewCartItem) -> DomainResult<CartItem> {
        let model = cart_item::ActiveModel {
            id: NotSet,
            product_id: Set(item.product_id),
            product_name: Set(item.product_name),
            unit_price: Set(item.unit_price),
            quantity: Set(item.quantity),
            restaurant_code: Set(item.restaurant_code),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let result = cart_item::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn clear(&self) -> DomainResult<()> {
        cart_item::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::migrated_db;

    fn line(product_id: i64, quantity: i32) -> NewCartItem {
        NewCartItem {
            product_id,
            product_name: format!("P{}", product_id),
            unit_price: 25_000.0,
            quantity,
            restaurant_code: "SweetDreams".to_string(),
        }
    }

    #[tokio::test]
    async fn lines_come_back_in_insertion_order() {
        let repo = SeaOrmCartRepository::new(migrated_db().await);
        let first = repo.add(line(1, 2)).await.unwrap();
        let second = repo.add(line(2, 1)).await.unwrap();
        assert!(second.id > first.id);

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.iter().map(|i| i.product_id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn delete_and_clear() {
        let repo = SeaOrmCartRepository::new(migrated_db().await);
        let item = repo.add(line(1, 1)).await.unwrap();
        repo.add(line(2, 1)).await.unwrap();

        assert!(repo.delete(item.id).await.unwrap());
        assert!(!repo.delete(item.id).await.unwrap());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        repo.clear().await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
