pub mod dish;
pub mod error;

pub use dish::{Dish, DishFilter, DishRepository, NewDish};
pub use error::{DomainError, DomainResult};
