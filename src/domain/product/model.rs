//! Product catalog entry

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in minor currency units
    pub price: i64,
    pub category: Option<String>,
    pub image_url: Option<String>,
    /// Owning restaurant code, e.g. `SweetDreams`
    pub restaurant: String,
    pub available: bool,
}

impl Product {
    pub fn sells_at(&self, restaurant: &str) -> bool {
        self.restaurant.eq_ignore_ascii_case(restaurant.trim())
    }
}

/// Partial product update. `image` is accepted as an alias of `imageUrl`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    #[serde(alias = "image")]
    pub image_url: Option<String>,
    pub restaurant: Option<String>,
    pub available: Option<bool>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.description {
            product.description = Some(v);
        }
        if let Some(v) = self.price {
            product.price = v.max(0);
        }
        if let Some(v) = self.category {
            product.category = Some(v);
        }
        if let Some(v) = self.image_url {
            product.image_url = Some(v);
        }
        if let Some(v) = self.restaurant {
            product.restaurant = v;
        }
        if let Some(v) = self.available {
            product.available = v;
        }
    }
}
