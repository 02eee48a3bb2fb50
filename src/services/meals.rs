use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::meal::{Category, MealSummary},
};

pub struct MealService;

impl MealService {
    /// All meals of a category, oldest first. Empty when the category has none.
    pub async fn list_by_category(
        pool: &SqlitePool,
        category: Category,
    ) -> Result<Vec<MealSummary>, AppError> {
        let meals = sqlx::query_as::<_, MealSummary>(
            "SELECT id, name FROM meals WHERE category = ? ORDER BY id",
        )
        .bind(category.as_str())
        .fetch_all(pool)
        .await?;
        Ok(meals)
    }

    /// Insert a meal and return its id. `(name, category)` must be unique.
    pub async fn create(pool: &SqlitePool, name: &str, category: Category) -> Result<i64, AppError> {
        let res = sqlx::query("INSERT INTO meals (name, category) VALUES (?, ?)")
            .bind(name)
            .bind(category.as_str())
            .execute(pool)
            .await;

        match res {
            Ok(done) => {
                let id = done.last_insert_rowid();
                tracing::info!(meal_id = id, %category, "Meal created: {name}");
                Ok(id)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::DuplicateMeal {
                    name: name.to_string(),
                    category,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Exact, case-sensitive name lookup within a category.
    pub async fn resolve_id_by_name(
        pool: &SqlitePool,
        name: &str,
        category: Category,
    ) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM meals WHERE name = ? AND category = ?")
            .bind(name)
            .bind(category.as_str())
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::MealNotFound {
                name: name.to_string(),
                category,
            })
    }

    /// Uniformly random meal of a category; no memory between calls.
    pub async fn resolve_random(pool: &SqlitePool, category: Category) -> Result<MealSummary, AppError> {
        sqlx::query_as::<_, MealSummary>(
            "SELECT id, name FROM meals WHERE category = ? ORDER BY RANDOM() LIMIT 1",
        )
        .bind(category.as_str())
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NoMealsInCategory(category))
    }
}
