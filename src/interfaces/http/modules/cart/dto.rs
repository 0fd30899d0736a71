//! Cart DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CartItem, NewCartItem};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub restaurant_code: String,
}

impl From<CartItem> for CartItemDto {
    fn from(i: CartItem) -> Self {
        Self {
            id: i.id,
            product_id: i.product_id,
            product_name: i.product_name,
            unit_price: i.unit_price,
            quantity: i.quantity,
            restaurant_code: i.restaurant_code,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: i64,
    #[validate(length(min = 1, message = "productName is required"))]
    pub product_name: String,
    #[validate(range(min = 0.0, message = "unitPrice must not be negative"))]
    pub unit_price: f64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "restaurantCode is required"))]
    pub restaurant_code: String,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(r: AddCartItemRequest) -> Self {
        Self {
            product_id: r.product_id,
            product_name: r.product_name,
            unit_price: r.unit_price,
            quantity: r.quantity,
            restaurant_code: r.restaurant_code,
        }
    }
}
