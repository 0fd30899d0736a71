//! Shopping cart line

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub restaurant_code: String,
}

/// Line to add; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub restaurant_code: String,
}

impl NewCartItem {
    pub fn with_id(self, id: i64) -> CartItem {
        CartItem {
            id,
            product_id: self.product_id,
            product_name: self.product_name,
            unit_price: self.unit_price,
            quantity: self.quantity,
            restaurant_code: self.restaurant_code,
        }
    }
}
