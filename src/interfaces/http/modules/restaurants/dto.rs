//! Restaurant DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Restaurant;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThemeDto {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
}

/// Restaurant API representation. The theme colours appear both flat and
/// grouped under `theme`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub rating: f64,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub theme: ThemeDto,
    pub owner_id: Option<String>,
    pub is_active: bool,
    pub created_at: Option<i64>,
}

impl From<Restaurant> for RestaurantDto {
    fn from(r: Restaurant) -> Self {
        Self {
            theme: ThemeDto {
                primary: r.theme.primary.clone(),
                secondary: r.theme.secondary.clone(),
                accent: r.theme.accent.clone(),
            },
            primary_color: r.theme.primary,
            secondary_color: r.theme.secondary,
            accent_color: r.theme.accent,
            id: r.id,
            name: r.name,
            description: r.description,
            category: r.category,
            location: r.location,
            rating: r.rating,
            owner_id: r.owner_id,
            is_active: r.is_active,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RestaurantListParams {
    /// Category, case-insensitive. Without it only active restaurants are listed.
    pub category: Option<String>,
}
