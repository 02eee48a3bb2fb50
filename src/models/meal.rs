use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Serving category. Persisted lowercase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Breakfast, Category::Lunch, Category::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Breakfast => "breakfast",
            Category::Lunch => "lunch",
            Category::Dinner => "dinner",
        }
    }

    /// Column of `menus` holding this category's meal id.
    pub fn menu_column(self) -> &'static str {
        match self {
            Category::Breakfast => "breakfast_id",
            Category::Lunch => "lunch_id",
            Category::Dinner => "dinner_id",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::InvalidCategory(s.to_string()))
    }
}

/// `{id, name}` pair as listed by GET /getMeals.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct MealSummary {
    pub id: i64,
    pub name: String,
}

/// Query params for GET /getMeals.
#[derive(Debug, Deserialize)]
pub struct MealsQuery {
    pub category: Option<String>,
}

/// Body for POST /addMeal.
#[derive(Debug, Deserialize)]
pub struct AddMealRequest {
    pub name: Option<String>,
    pub category: Option<String>,
}
