//! Dish entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dish model - one row per dish, canteens stored as a JSON array of names
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dishes")]
pub struct Model {
    /// UUID v7, so ordering by id follows insertion order
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    pub tag: String,

    /// `["East Canteen", "West Canteen"]`
    #[sea_orm(column_type = "JsonBinary")]
    pub canteen: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Canteen names, skipping anything that is not a JSON string
    pub fn canteens(&self) -> Vec<String> {
        self.canteen
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}
