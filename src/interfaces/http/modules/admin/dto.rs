//! Admin DTOs
//!
//! The report rows themselves are the application read models
//! (`AdminStats`, `AdminRestaurant`, ...), which already derive `ToSchema`.

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

// The dashboard sends `true`/`false` as JSON booleans or strings.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Bool(b)) => Some(b),
        Some(serde_json::Value::String(s)) => Some(s.trim().eq_ignore_ascii_case("true")),
        _ => None,
    })
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantStatusRequest {
    #[serde(default, deserialize_with = "lenient_bool")]
    #[schema(value_type = Option<bool>)]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_active_accepts_bool_and_string() {
        let a: RestaurantStatusRequest = serde_json::from_str(r#"{"isActive": false}"#).unwrap();
        let b: RestaurantStatusRequest = serde_json::from_str(r#"{"isActive": "TRUE"}"#).unwrap();
        let c: RestaurantStatusRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(a.is_active, Some(false));
        assert_eq!(b.is_active, Some(true));
        assert_eq!(c.is_active, None);
    }
}
