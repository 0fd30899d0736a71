//! Catalog service: product CRUD and restaurant lookups

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Product, ProductPatch, RepositoryProvider, Restaurant,
};

#[derive(Clone)]
pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Products ────────────────────────────────────────────────

    /// All products sorted by name, or one restaurant's (case-insensitive).
    pub async fn products(&self, restaurant: Option<&str>) -> DomainResult<Vec<Product>> {
        match restaurant.map(str::trim).filter(|r| !r.is_empty()) {
            Some(r) => self.repos.products().find_by_restaurant(r).await,
            None => self.repos.products().find_all().await,
        }
    }

    pub async fn product(&self, id: &str) -> DomainResult<Product> {
        self.repos
            .products()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    /// Insert or overwrite. The caller supplies the id.
    pub async fn save_product(&self, product: Product) -> DomainResult<Product> {
        if product.id.trim().is_empty() {
            return Err(DomainError::Validation("Product id is required".into()));
        }
        self.repos.products().save(&product).await?;
        info!(product_id = %product.id, restaurant = %product.restaurant, "Product saved");
        Ok(product)
    }

    pub async fn patch_product(&self, id: &str, patch: ProductPatch) -> DomainResult<Product> {
        let mut product = self.product(id).await?;
        patch.apply(&mut product);
        self.repos.products().save(&product).await?;
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> DomainResult<()> {
        if !self.repos.products().delete(id).await? {
            return Err(DomainError::not_found("Product", id));
        }
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    // ── Restaurants ─────────────────────────────────────────────

    /// Active restaurants, or every restaurant in `category`.
    pub async fn restaurants(&self, category: Option<&str>) -> DomainResult<Vec<Restaurant>> {
        match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => self.repos.restaurants().find_by_category(c).await,
            None => self.repos.restaurants().find_active().await,
        }
    }

    pub async fn restaurant(&self, id: &str) -> DomainResult<Restaurant> {
        self.repos
            .restaurants()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Restaurant", id))
    }

    pub async fn restaurant_by_owner(&self, owner_id: &str) -> DomainResult<Restaurant> {
        self.repos
            .restaurants()
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Restaurant",
                field: "owner_id",
                value: owner_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ThemeColors;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn product(id: &str, name: &str, restaurant: &str) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            description: None,
            price: 10_000,
            category: None,
            image_url: None,
            restaurant: restaurant.into(),
            available: true,
        }
    }

    fn restaurant(id: &str, category: &str, is_active: bool) -> Restaurant {
        Restaurant {
            id: id.into(),
            name: id.into(),
            description: None,
            category: Some(category.into()),
            location: None,
            rating: 4.0,
            theme: ThemeColors::default(),
            owner_id: Some(format!("owner-{}", id)),
            is_active,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn products_sorted_and_filtered() {
        let svc = CatalogService::new(Arc::new(InMemoryRepositoryProvider::new()));
        svc.save_product(product("p2", "Pizza", "Aloha")).await.unwrap();
        svc.save_product(product("p1", "Burger", "Aloha")).await.unwrap();
        svc.save_product(product("p3", "Donut", "SweetDreams")).await.unwrap();

        let names: Vec<String> = svc.products(None).await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Burger", "Donut", "Pizza"]);
        assert_eq!(svc.products(Some("aloha")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn blank_id_is_rejected_and_delete_reports_missing() {
        let svc = CatalogService::new(Arc::new(InMemoryRepositoryProvider::new()));
        let err = svc.save_product(product(" ", "X", "Aloha")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(matches!(svc.delete_product("nope").await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn restaurant_listing_hides_inactive() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos.restaurants().save(&restaurant("A", "Dessert", true)).await.unwrap();
        repos.restaurants().save(&restaurant("B", "Dessert", false)).await.unwrap();
        let svc = CatalogService::new(repos);

        assert_eq!(svc.restaurants(None).await.unwrap().len(), 1);
        assert_eq!(svc.restaurants(Some("dessert")).await.unwrap().len(), 2);
        assert_eq!(svc.restaurant_by_owner("owner-B").await.unwrap().id, "B");
    }
}
