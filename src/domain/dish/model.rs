//! Dish domain entity

use uuid::Uuid;

/// A dish on the canteen menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    pub id: Uuid,
    pub name: String,
    pub tag: String,
    /// Canteens serving the dish
    pub canteen: Vec<String>,
}

/// A dish that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDish {
    pub name: String,
    pub tag: String,
    pub canteen: Vec<String>,
}

impl NewDish {
    /// Build from raw cells. `canteens` is a comma separated list; blank
    /// entries are dropped and every value is trimmed.
    pub fn from_cells(name: &str, canteens: &str, tag: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            tag: tag.trim().to_string(),
            canteen: canteens
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

/// Listing filters. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishFilter {
    /// Substring of the dish name
    pub name: Option<String>,
    /// Exact canteen that must serve the dish
    pub canteen: Option<String>,
    /// Substring of the tag
    pub tag: Option<String>,
}

impl DishFilter {
    /// Empty strings are treated as "not given".
    pub fn new(name: &str, canteen: &str, tag: &str) -> Self {
        fn non_empty(s: &str) -> Option<String> {
            (!s.is_empty()).then(|| s.to_string())
        }
        Self {
            name: non_empty(name),
            canteen: non_empty(canteen),
            tag: non_empty(tag),
        }
    }
}
