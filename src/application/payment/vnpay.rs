//! VNPay payment URL builder
//!
//! The gateway verifies an HMAC-SHA512 over the sorted, *unencoded*
//! parameters, while the browser receives the form-encoded query. Both are
//! derived from the same sorted map so the two can never drift.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::config::VnpayConfig;
use crate::infrastructure::crypto::signature::hmac_sha512_hex;
use crate::shared::errors::DomainError;
use crate::shared::time::now_millis;

const VERSION: &str = "2.1.0";
const COMMAND: &str = "pay";
const CURRENCY: &str = "VND";
const CREATE_DATE_FORMAT: &str = "%Y%m%d%H%M%S";
const DEFAULT_ORDER_INFO: &str = "Thanh toan don hang";

/// Hex casing of `vnp_SecureHash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashCase {
    Lower,
    Upper,
}

/// Everything needed to sign one payment request.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: i64,
    pub order_id: String,
    pub order_info: String,
    pub order_type: String,
    pub locale: String,
    pub ip_addr: Option<String>,
    pub created_at: NaiveDateTime,
}

impl PaymentRequest {
    /// Request with the gateway defaults used by the checkout page.
    pub fn for_order(amount: i64, order_id: impl Into<String>, created_at: NaiveDateTime) -> Self {
        let order_id = order_id.into();
        Self {
            amount,
            order_info: format!("{} {}", DEFAULT_ORDER_INFO, order_id),
            order_id,
            order_type: "other".to_string(),
            locale: "vn".to_string(),
            ip_addr: None,
            created_at,
        }
    }
}

/// Build the signed redirect URL for `request`.
pub fn build_payment_url(
    config: &VnpayConfig,
    request: &PaymentRequest,
    case: HashCase,
) -> Result<String, DomainError> {
    // The gateway expects the amount in hundredths.
    let gateway_amount = Some(request.amount)
        .filter(|a| *a > 0)
        .and_then(|a| a.checked_mul(100))
        .ok_or_else(|| DomainError::Validation("Invalid amount".to_string()))?;

    let mut params: BTreeMap<&str, String> = BTreeMap::new();
    params.insert("vnp_Version", VERSION.to_string());
    params.insert("vnp_Command", COMMAND.to_string());
    params.insert("vnp_TmnCode", config.tmn_code.clone());
    params.insert("vnp_Amount", gateway_amount.to_string());
    params.insert("vnp_CurrCode", CURRENCY.to_string());
    params.insert("vnp_TxnRef", request.order_id.clone());
    params.insert("vnp_OrderInfo", request.order_info.clone());
    params.insert("vnp_OrderType", request.order_type.clone());
    params.insert("vnp_Locale", request.locale.clone());
    params.insert("vnp_ReturnUrl", config.return_url.clone());
    params.insert(
        "vnp_CreateDate",
        request.created_at.format(CREATE_DATE_FORMAT).to_string(),
    );
    if let Some(ip) = &request.ip_addr {
        params.insert("vnp_IpAddr", ip.clone());
    }
    params.retain(|_, v| !v.is_empty());

    let hash_data = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let signature = hmac_sha512_hex(&config.hash_secret, &hash_data)?;
    let signature = match case {
        HashCase::Lower => signature,
        HashCase::Upper => signature.to_uppercase(),
    };

    Ok(format!(
        "{}?{}&vnp_SecureHash={}",
        config.url, query, signature
    ))
}

fn form_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Result of the checkout-page payment endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPayment {
    pub payment_url: String,
    pub order_id: String,
    pub amount: i64,
}

/// Optional fields of a checkout-page payment request.
#[derive(Debug, Clone, Default)]
pub struct CheckoutOptions {
    pub order_id: Option<String>,
    pub order_info: Option<String>,
    pub order_type: Option<String>,
    pub locale: Option<String>,
}

#[derive(Clone)]
pub struct VnpayService {
    config: VnpayConfig,
}

impl VnpayService {
    pub fn new(config: VnpayConfig) -> Self {
        Self { config }
    }

    /// Signed URL for an existing order, lowercase signature.
    pub fn create_order_payment(&self, amount: i64, order_id: &str) -> Result<String, DomainError> {
        let request = PaymentRequest::for_order(amount, order_id, Local::now().naive_local());
        let url = build_payment_url(&self.config, &request, HashCase::Lower)?;
        info!(order_id = %order_id, amount, "VNPay payment URL created");
        Ok(url)
    }

    /// Signed URL for the checkout page, uppercase signature and the
    /// caller's address.
    pub fn create_checkout_payment(
        &self,
        amount: i64,
        options: CheckoutOptions,
        client_ip: &str,
    ) -> Result<CheckoutPayment, DomainError> {
        let order_id = options
            .order_id
            .unwrap_or_else(|| format!("ORDER-{}", now_millis()));
        let request = PaymentRequest {
            amount,
            order_id: order_id.clone(),
            order_info: options
                .order_info
                .unwrap_or_else(|| DEFAULT_ORDER_INFO.to_string()),
            order_type: options.order_type.unwrap_or_else(|| "other".to_string()),
            locale: options.locale.unwrap_or_else(|| "vn".to_string()),
            ip_addr: Some(client_ip.to_string()),
            created_at: Local::now().naive_local(),
        };
        let payment_url = build_payment_url(&self.config, &request, HashCase::Upper)?;

        info!(order_id = %order_id, amount, "VNPay checkout URL created");
        if self.config.has_placeholder_credentials() {
            warn!("VNPay is using placeholder credentials; set vnpay.tmn_code and vnpay.hash_secret");
        }

        Ok(CheckoutPayment {
            payment_url,
            order_id,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> VnpayConfig {
        VnpayConfig {
            url: "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".to_string(),
            tmn_code: "DEMO0001".to_string(),
            hash_secret: "SECRET".to_string(),
            return_url: "http://localhost:5173/payment-callback".to_string(),
        }
    }

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 15)
            .unwrap()
    }

    fn query_of(url: &str) -> &str {
        url.split_once('?').unwrap().1
    }

    #[test]
    fn rejects_non_positive_amount() {
        let req = PaymentRequest::for_order(0, "O1", fixed_time());
        let err = build_payment_url(&config(), &req, HashCase::Lower).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == "Invalid amount"));
    }

    #[test]
    fn amount_that_overflows_in_hundredths_is_invalid() {
        let req = PaymentRequest::for_order(i64::MAX / 10, "O1", fixed_time());
        let err = build_payment_url(&config(), &req, HashCase::Lower).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == "Invalid amount"));

        let req = PaymentRequest::for_order(i64::MAX / 100, "O1", fixed_time());
        let url = build_payment_url(&config(), &req, HashCase::Lower).unwrap();
        assert!(url.contains(&format!("vnp_Amount={}", (i64::MAX / 100) * 100)));
    }

    #[test]
    fn signature_is_deterministic() {
        let req = PaymentRequest::for_order(125000, "ORDER-1", fixed_time());
        let a = build_payment_url(&config(), &req, HashCase::Lower).unwrap();
        let b = build_payment_url(&config(), &req, HashCase::Lower).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn params_are_sorted_and_form_encoded() {
        let req = PaymentRequest::for_order(125000, "ORDER-1", fixed_time());
        let url = build_payment_url(&config(), &req, HashCase::Lower).unwrap();
        let keys: Vec<&str> = query_of(&url)
            .split('&')
            .map(|pair| pair.split_once('=').unwrap().0)
            .collect();

        let mut sorted = keys[..keys.len() - 1].to_vec();
        sorted.sort();
        assert_eq!(&keys[..keys.len() - 1], sorted.as_slice());
        assert_eq!(keys.last(), Some(&"vnp_SecureHash"));

        assert!(url.contains("vnp_Amount=12500000"));
        assert!(url.contains("vnp_CreateDate=20240501093015"));
        assert!(url.contains("vnp_OrderInfo=Thanh+toan+don+hang+ORDER-1"));
        assert!(url.contains("vnp_ReturnUrl=http%3A%2F%2Flocalhost%3A5173%2Fpayment-callback"));
    }

    #[test]
    fn signature_covers_unencoded_values() {
        let req = PaymentRequest::for_order(1000, "O1", fixed_time());
        let url = build_payment_url(&config(), &req, HashCase::Lower).unwrap();
        let expected_input = "vnp_Amount=100000&vnp_Command=pay&vnp_CreateDate=20240501093015\
            &vnp_CurrCode=VND&vnp_Locale=vn&vnp_OrderInfo=Thanh toan don hang O1\
            &vnp_OrderType=other&vnp_ReturnUrl=http://localhost:5173/payment-callback\
            &vnp_TmnCode=DEMO0001&vnp_TxnRef=O1&vnp_Version=2.1.0";
        let expected = hmac_sha512_hex("SECRET", expected_input).unwrap();
        assert!(url.ends_with(&format!("&vnp_SecureHash={}", expected)));
    }

    #[test]
    fn upper_case_only_changes_the_hash_casing() {
        let req = PaymentRequest::for_order(1000, "O1", fixed_time());
        let lower = build_payment_url(&config(), &req, HashCase::Lower).unwrap();
        let upper = build_payment_url(&config(), &req, HashCase::Upper).unwrap();
        let (lower_head, lower_sig) = lower.rsplit_once('=').unwrap();
        let (upper_head, upper_sig) = upper.rsplit_once('=').unwrap();
        assert_eq!(lower_head, upper_head);
        assert_eq!(lower_sig.to_uppercase(), upper_sig);
    }

    #[test]
    fn empty_values_are_skipped() {
        let mut req = PaymentRequest::for_order(1000, "O1", fixed_time());
        req.locale = String::new();
        let url = build_payment_url(&config(), &req, HashCase::Lower).unwrap();
        assert!(!url.contains("vnp_Locale"));
    }

    #[test]
    fn checkout_defaults_and_client_ip() {
        let service = VnpayService::new(config());
        let payment = service
            .create_checkout_payment(50000, CheckoutOptions::default(), "10.0.0.7")
            .unwrap();
        assert!(payment.order_id.starts_with("ORDER-"));
        assert_eq!(payment.amount, 50000);
        assert!(payment.payment_url.contains("vnp_IpAddr=10.0.0.7"));
        assert!(payment.payment_url.contains("vnp_OrderInfo=Thanh+toan+don+hang&"));
    }

    #[test]
    fn checkout_rejects_negative_amount() {
        let service = VnpayService::new(config());
        let result = service.create_checkout_payment(-5, CheckoutOptions::default(), "127.0.0.1");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
