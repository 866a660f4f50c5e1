//! Dish repository interface

use async_trait::async_trait;

use super::model::{Dish, DishFilter, NewDish};
use crate::domain::DomainResult;
use crate::shared::PageInfo;

#[async_trait]
pub trait DishRepository: Send + Sync {
    /// One page of dishes matching `filter`, plus the number of matching rows.
    async fn list(&self, filter: &DishFilter, page: PageInfo) -> DomainResult<(Vec<Dish>, u64)>;

    /// Insert dishes in chunks of `batch_size`. Returns the number inserted.
    async fn insert_many(&self, dishes: Vec<NewDish>, batch_size: usize) -> DomainResult<u64>;
}
