use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::meal::Category;

/// One date's menu with each slot resolved to its meal name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MenuView {
    pub date: String,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

/// Raw `menus` row: slot ids, unresolved.
#[derive(Debug, Clone, FromRow)]
pub struct MenuRow {
    pub date: String,
    pub breakfast_id: Option<i64>,
    pub lunch_id: Option<i64>,
    pub dinner_id: Option<i64>,
}

impl MenuRow {
    pub fn slot(&self, category: Category) -> Option<i64> {
        match category {
            Category::Breakfast => self.breakfast_id,
            Category::Lunch => self.lunch_id,
            Category::Dinner => self.dinner_id,
        }
    }
}

/// Full slot assignment written by an upsert.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuSlots {
    pub breakfast_id: Option<i64>,
    pub lunch_id: Option<i64>,
    pub dinner_id: Option<i64>,
}

/// Query params for GET /getMenu.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// Calendar date, stored exactly as received (e.g. "2024-01-01").
    pub date: Option<String>,
}

/// Body for POST /addMenu. Slots carry meal names.
#[derive(Debug, Deserialize)]
pub struct AddMenuRequest {
    pub date: Option<String>,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

/// Body for POST /changeMeal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeMealRequest {
    pub date: Option<String>,
    pub category: Option<String>,
    /// Meal name, or "random" (any case) for a random meal of the category.
    pub new_meal: Option<String>,
}
