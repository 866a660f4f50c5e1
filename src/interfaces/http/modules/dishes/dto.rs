//! Dish API data transfer objects

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Dish, DishFilter};
use crate::shared::PageInfo;
use crate::{describe_request, field};

/// Query parameters of `GET /api/dish/list`
///
/// Every parameter is optional. `page` and `page_size` values that are
/// missing or not positive fall back to 1 and 10.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ListDishReq {
    /// Page number, 1-based
    pub page: i64,
    /// Items per page
    pub page_size: i64,
    /// Substring of the dish name
    pub name: String,
    /// Canteen that must serve the dish (exact name)
    pub canteen: String,
    /// Substring of the dish tag
    pub tag: String,
}

describe_request!(ListDishReq => [
    field!(ListDishReq, page).query("page"),
    field!(ListDishReq, page_size).query("page_size"),
    field!(ListDishReq, name).query("name"),
    field!(ListDishReq, canteen).query("canteen"),
    field!(ListDishReq, tag).query("tag"),
]);

impl ListDishReq {
    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.page, self.page_size).normalized()
    }

    pub fn filter(&self) -> DishFilter {
        DishFilter::new(&self.name, &self.canteen, &self.tag)
    }
}

/// A dish as returned by the API
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "01929b6e-7a3c-7cc4-8f5d-3a1f4c2b9e10",
    "name": "Kung Pao Chicken",
    "tag": "spicy",
    "canteen": ["East Canteen", "West Canteen"]
}))]
pub struct DishDto {
    pub id: Uuid,
    pub name: String,
    pub tag: String,
    /// Canteens serving the dish
    pub canteen: Vec<String>,
}

impl From<Dish> for DishDto {
    fn from(d: Dish) -> Self {
        Self {
            id: d.id,
            name: d.name,
            tag: d.tag,
            canteen: d.canteen,
        }
    }
}
