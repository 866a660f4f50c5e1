//! Infrastructure layer - database and server lifecycle

pub mod database;
pub mod server;

pub use database::repositories::SeaOrmDishRepository;
pub use database::seed::{seed_dishes, SeedError};
pub use database::{init_database, DatabaseConfig};
pub use server::{run_cleanup, ShutdownSignal};
