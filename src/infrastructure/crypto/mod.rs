//! Token, password and signature primitives

pub mod jwt;
pub mod password;
pub mod signature;
