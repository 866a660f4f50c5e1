//! Dish aggregate
//!
//! A dish served by one or more canteens, with a free-form tag.

pub mod model;
pub mod repository;

pub use model::{Dish, DishFilter, NewDish};
pub use repository::DishRepository;
