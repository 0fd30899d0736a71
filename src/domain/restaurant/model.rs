//! Restaurant entity

/// Brand colours used by the storefront theme
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub rating: f64,
    pub theme: ThemeColors,
    pub owner_id: Option<String>,
    /// Inactive restaurants are pending approval and hidden from customers
    pub is_active: bool,
    pub created_at: Option<i64>,
}

impl Restaurant {
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .map(|c| c.eq_ignore_ascii_case(category.trim()))
            .unwrap_or(false)
    }
}
