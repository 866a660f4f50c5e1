//! Database repository implementations

pub mod dish_repository;

pub use dish_repository::SeaOrmDishRepository;
