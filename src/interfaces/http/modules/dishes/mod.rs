//! Dish listing endpoint

pub mod dto;
pub mod handlers;

pub use dto::{DishDto, ListDishReq};
pub use handlers::{list_dishes, DishState};
