//! # CAU Dish Service
//!
//! HTTP backend listing canteen dishes with pagination and filters.
//!
//! ## Architecture
//!
//! - **domain**: dish model, filter and repository trait
//! - **infrastructure**: SeaORM storage, migrations, CSV seeding, shutdown
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: pagination types and declarative request binding/validation

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, seed_dishes, DatabaseConfig, SeaOrmDishRepository};

pub use interfaces::http::create_api_router;
