use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{require, ApiError, AppError},
    models::{
        meal::{Category, MealSummary},
        menu::{AddMenuRequest, ChangeMealRequest, MenuQuery, MenuSlots},
    },
    services::{meals::MealService, menu::MenuService},
    AppState,
};

/// GET /getMenu?date=YYYY-MM-DD
pub async fn get_menu(
    State(state): State<AppState>,
    Query(params): Query<MenuQuery>,
) -> Result<Json<Value>, ApiError> {
    let date = require(params.date, "date")?;
    let menu = MenuService::get_by_date(&state.db, &date).await?;
    Ok(Json(json!(menu)))
}

/// POST /addMenu — slot names are resolved together; nothing is written
/// unless all three resolve.
pub async fn add_menu(
    State(state): State<AppState>,
    payload: Result<Json<AddMenuRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let date = require(body.date, "date")?;
    let breakfast = require(body.breakfast, "breakfast")?;
    let lunch = require(body.lunch, "lunch")?;
    let dinner = require(body.dinner, "dinner")?;

    let (breakfast_id, lunch_id, dinner_id) = tokio::try_join!(
        MealService::resolve_id_by_name(&state.db, &breakfast, Category::Breakfast),
        MealService::resolve_id_by_name(&state.db, &lunch, Category::Lunch),
        MealService::resolve_id_by_name(&state.db, &dinner, Category::Dinner),
    )
    .map_err(ApiError::client)?;

    let slots = MenuSlots {
        breakfast_id: Some(breakfast_id),
        lunch_id: Some(lunch_id),
        dinner_id: Some(dinner_id),
    };
    MenuService::upsert(&state.db, &date, slots).await?;

    Ok(Json(json!({ "success": format!("Menu for {date} saved") })))
}

/// POST /changeMeal — swap one slot of an existing menu. `newMeal: "random"`
/// picks any meal of the category.
pub async fn change_meal(
    State(state): State<AppState>,
    payload: Result<Json<ChangeMealRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let date = require(body.date, "date")?;
    let category: Category = require(body.category, "category")?.parse()?;
    let new_meal = require(body.new_meal, "newMeal")?;

    let resolve = async {
        if new_meal.eq_ignore_ascii_case("random") {
            MealService::resolve_random(&state.db, category).await
        } else {
            let id = MealService::resolve_id_by_name(&state.db, &new_meal, category).await?;
            Ok::<_, AppError>(MealSummary { id, name: new_meal.clone() })
        }
    };

    let (meal, current) = tokio::try_join!(resolve, MenuService::get_row(&state.db, &date))
        .map_err(ApiError::client)?;

    tracing::debug!(
        date = %current.date,
        %category,
        previous = ?current.slot(category),
        next = meal.id,
        "Changing menu slot"
    );
    MenuService::set_slot(&state.db, &date, category, meal.id)
        .await
        .map_err(ApiError::client)?;

    Ok(Json(json!({
        "success": format!("{category} for {date} changed"),
        "newMeal": meal.name,
    })))
}

