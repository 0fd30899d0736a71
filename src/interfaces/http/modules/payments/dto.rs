//! Payment DTOs

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::application::payment::{CheckoutOptions, CheckoutPayment};

// Amounts come as JSON numbers or numeric strings.
fn lenient_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| serde::de::Error::custom("Invalid amount")),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom("Invalid amount")),
        _ => Err(serde::de::Error::custom("Invalid amount")),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPaymentRequest {
    #[serde(default, deserialize_with = "lenient_amount")]
    #[schema(value_type = i64)]
    pub amount: i64,
    pub order_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentUrlResponse {
    pub url: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPaymentRequest {
    #[serde(default, deserialize_with = "lenient_amount")]
    #[schema(value_type = i64)]
    pub amount: i64,
    pub order_id: Option<String>,
    pub order_info: Option<String>,
    pub order_type: Option<String>,
    pub locale: Option<String>,
}

impl CheckoutPaymentRequest {
    pub fn options(&self) -> CheckoutOptions {
        CheckoutOptions {
            order_id: self.order_id.clone(),
            order_info: self.order_info.clone(),
            order_type: self.order_type.clone(),
            locale: self.locale.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPaymentResponse {
    pub payment_url: String,
    pub order_id: String,
    pub amount: i64,
}

impl From<CheckoutPayment> for CheckoutPaymentResponse {
    fn from(p: CheckoutPayment) -> Self {
        Self {
            payment_url: p.payment_url,
            order_id: p.order_id,
            amount: p.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_numbers_and_strings() {
        let a: OrderPaymentRequest =
            serde_json::from_str(r#"{"amount": 125000, "orderId": "O1"}"#).unwrap();
        let b: OrderPaymentRequest =
            serde_json::from_str(r#"{"amount": "125000", "orderId": "O1"}"#).unwrap();
        assert_eq!(a.amount, 125_000);
        assert_eq!(b.amount, 125_000);
    }

    #[test]
    fn missing_amount_is_zero() {
        let r: CheckoutPaymentRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(r.amount, 0);
        assert!(r.options().order_id.is_none());
    }

    #[test]
    fn garbage_amount_is_rejected() {
        assert!(serde_json::from_str::<OrderPaymentRequest>(r#"{"amount": "abc", "orderId": "O1"}"#).is_err());
    }
}
