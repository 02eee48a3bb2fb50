use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{require, ApiError},
    models::meal::{AddMealRequest, Category, MealsQuery},
    services::meals::MealService,
    AppState,
};

/// GET /getMeals?category=breakfast|lunch|dinner
pub async fn get_meals(
    State(state): State<AppState>,
    Query(params): Query<MealsQuery>,
) -> Result<Json<Value>, ApiError> {
    let category: Category = require(params.category, "category")?.parse()?;
    let meals = MealService::list_by_category(&state.db, category).await?;
    Ok(Json(json!({ "meals": meals })))
}

/// POST /addMeal
pub async fn add_meal(
    State(state): State<AppState>,
    payload: Result<Json<AddMealRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let name = require(body.name, "name")?;
    let category: Category = require(body.category, "category")?.parse()?;

    let id = MealService::create(&state.db, &name, category).await?;
    Ok(Json(json!({
        "success": format!("Meal '{name}' added to {category}"),
        "mealId": id,
    })))
}
