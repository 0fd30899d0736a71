//! HTTP REST API interfaces
//!
//! - `common`: error envelope, domain error mapping, JSON extractors
//! - `middleware`: admin bearer-token guard
//! - `modules`: one DTO + handler module per resource
//! - `router`: route table with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiContext};
