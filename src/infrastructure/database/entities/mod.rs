//! Database entities module

pub mod dish;

pub use dish::Entity as Dish;
