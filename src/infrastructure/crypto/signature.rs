//! HMAC request signing for the payment gateway

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::shared::errors::InfraError;

type HmacSha512 = Hmac<Sha512>;

/// Lowercase hex HMAC-SHA512 of `data` keyed with `secret`.
pub fn hmac_sha512_hex(secret: &str, data: &str) -> Result<String, InfraError> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| InfraError::Crypto(format!("HMAC key error: {}", e)))?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_rfc4231_case_2() {
        let sig = hmac_sha512_hex("Jefe", "what do ya want for nothing?").unwrap();
        assert_eq!(
            sig,
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn empty_secret_is_accepted() {
        assert_eq!(hmac_sha512_hex("", "x").unwrap().len(), 128);
    }
}
