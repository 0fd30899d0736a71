use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::user::{User, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Customer => UserRole::Customer,
        user::UserRole::Restaurant => UserRole::Restaurant,
        user::UserRole::Suspended => UserRole::Suspended,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Customer => user::UserRole::Customer,
        UserRole::Restaurant => user::UserRole::Restaurant,
        UserRole::Suspended => user::UserRole::Suspended,
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        password_hash: m.password_hash,
        name: m.name,
        email: m.email,
        phone: m.phone,
        role: entity_role_to_domain(m.role),
        restaurant_id: m.restaurant_id,
        order_count: m.order_count,
        created_at: m.created_at,
    }
}

fn domain_to_active(u: &User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id.clone()),
        username: Set(u.username.clone()),
        password_hash: Set(u.password_hash.clone()),
        name: Set(u.name.clone()),
        email: Set(u.email.clone()),
        phone: Set(u.phone.clone()),
        role: Set(domain_role_to_entity(u.role)),
        restaurant_id: Set(u.restaurant_id.clone()),
        order_count: Set(u.order_count),
        created_at: Set(u.created_at),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, u: &User) -> DomainResult<()> {
        domain_to_active(u)
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, || format!("User {} already exists", u.username)))?;
        Ok(())
    }

    async fn update(&self, u: &User) -> DomainResult<()> {
        let exists = user::Entity::find_by_id(u.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("User", u.id.clone()));
        }
        domain_to_active(u)
            .update(&self.db)
            .await
            .map_err(|e| write_err(e, || format!("User {} already exists", u.username)))?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_role(&self, role: UserRole) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .filter(user::Column::Role.eq(domain_role_to_entity(role)))
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::migrated_db;

    fn customer(id: &str, username: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            name: Some("Lan".to_string()),
            email: Some(email.to_string()),
            phone: None,
            role: UserRole::Customer,
            restaurant_id: None,
            order_count: 0,
            created_at: 1,
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = SeaOrmUserRepository::new(migrated_db().await);
        repo.create(&customer("CUS-1", "lan", "lan@example.com")).await.unwrap();
        let err = repo
            .create(&customer("CUS-2", "lan", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn role_round_trips_and_filters() {
        let repo = SeaOrmUserRepository::new(migrated_db().await);
        let mut u = customer("CUS-1", "lan", "lan@example.com");
        repo.create(&u).await.unwrap();
        u.role = UserRole::Suspended;
        repo.update(&u).await.unwrap();

        assert!(repo.find_by_role(UserRole::Customer).await.unwrap().is_empty());
        let suspended = repo.find_by_role(UserRole::Suspended).await.unwrap();
        assert_eq!(suspended.len(), 1);
        assert_eq!(
            repo.find_by_email("lan@example.com").await.unwrap().unwrap().id,
            "CUS-1"
        );
    }

    #[tokio::test]
    async fn update_of_unknown_user_is_not_found() {
        let repo = SeaOrmUserRepository::new(migrated_db().await);
        let err = repo
            .update(&customer("CUS-9", "ghost", "g@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
