//! Product DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Product;

/// Product API representation. `image` mirrors `imageUrl` for older
/// clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub image: Option<String>,
    pub restaurant: String,
    pub available: bool,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            category: p.category,
            image: p.image_url.clone(),
            image_url: p.image_url,
            restaurant: p.restaurant,
            available: p.available,
        }
    }
}

/// Create or replace a product
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductRequest {
    #[serde(default)]
    pub id: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
    pub category: Option<String>,
    #[serde(alias = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub restaurant: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl From<SaveProductRequest> for Product {
    fn from(r: SaveProductRequest) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            price: r.price,
            category: r.category,
            image_url: r.image_url,
            restaurant: r.restaurant,
            available: r.available,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductListParams {
    /// Restaurant name, case-insensitive
    pub restaurant: Option<String>,
}
