//! HTTP REST API
//!
//! - `common`: response envelope and validating extractors
//! - `modules`: route handlers grouped by resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
