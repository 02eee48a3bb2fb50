use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        meal::Category,
        menu::{MenuRow, MenuSlots, MenuView},
    },
};

pub struct MenuService;

impl MenuService {
    /// Menu for a date with every slot resolved to its meal name.
    /// A slot that is unset (or dangling) comes back as `None`.
    pub async fn get_by_date(pool: &SqlitePool, date: &str) -> Result<MenuView, AppError> {
        sqlx::query_as::<_, MenuView>(
            r#"SELECT m.date,
                      b.name AS breakfast,
                      l.name AS lunch,
                      d.name AS dinner
               FROM menus m
               LEFT JOIN meals b ON b.id = m.breakfast_id
               LEFT JOIN meals l ON l.id = m.lunch_id
               LEFT JOIN meals d ON d.id = m.dinner_id
               WHERE m.date = ?"#,
        )
        .bind(date)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::MenuNotFound(date.to_string()))
    }

    /// Raw slot ids for a date.
    pub async fn get_row(pool: &SqlitePool, date: &str) -> Result<MenuRow, AppError> {
        sqlx::query_as::<_, MenuRow>(
            "SELECT date, breakfast_id, lunch_id, dinner_id FROM menus WHERE date = ?",
        )
        .bind(date)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::MenuNotFound(date.to_string()))
    }

    /// Insert the menu for a date, or overwrite all three slots of the existing one.
    pub async fn upsert(pool: &SqlitePool, date: &str, slots: MenuSlots) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO menus (date, breakfast_id, lunch_id, dinner_id)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (date) DO UPDATE SET
                   breakfast_id = excluded.breakfast_id,
                   lunch_id = excluded.lunch_id,
                   dinner_id = excluded.dinner_id"#,
        )
        .bind(date)
        .bind(slots.breakfast_id)
        .bind(slots.lunch_id)
        .bind(slots.dinner_id)
        .execute(pool)
        .await?;

        tracing::info!(
            date,
            breakfast_id = ?slots.breakfast_id,
            lunch_id = ?slots.lunch_id,
            dinner_id = ?slots.dinner_id,
            "Menu saved"
        );
        Ok(())
    }

    /// Point the slot of `category` at `meal_id`, leaving the other slots alone.
    /// Never creates a menu.
    pub async fn set_slot(
        pool: &SqlitePool,
        date: &str,
        category: Category,
        meal_id: i64,
    ) -> Result<(), AppError> {
        let column = category.menu_column();
        let done = sqlx::query(&format!("UPDATE menus SET {column} = ? WHERE date = ?"))
            .bind(meal_id)
            .bind(date)
            .execute(pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(AppError::MenuNotFound(date.to_string()));
        }
        tracing::info!(date, %category, meal_id, "Menu slot changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, services::meals::MealService};

    struct Fixture {
        pool: SqlitePool,
        pancakes: i64,
        soup: i64,
        pasta: i64,
    }

    async fn fixture() -> Fixture {
        let pool = db::connect_in_memory().await.unwrap();
        db::init_schema(&pool).await.unwrap();
        let pancakes = MealService::create(&pool, "Pancakes", Category::Breakfast).await.unwrap();
        let soup = MealService::create(&pool, "Soup", Category::Lunch).await.unwrap();
        let pasta = MealService::create(&pool, "Pasta", Category::Dinner).await.unwrap();
        Fixture { pool, pancakes, soup, pasta }
    }

    fn full(f: &Fixture) -> MenuSlots {
        MenuSlots {
            breakfast_id: Some(f.pancakes),
            lunch_id: Some(f.soup),
            dinner_id: Some(f.pasta),
        }
    }

    #[tokio::test]
    async fn missing_menu_is_not_found() {
        let f = fixture().await;
        assert!(matches!(
            MenuService::get_by_date(&f.pool, "2024-01-01").await,
            Err(AppError::MenuNotFound(ref d)) if d == "2024-01-01"
        ));
        assert!(matches!(
            MenuService::get_row(&f.pool, "2024-01-01").await,
            Err(AppError::MenuNotFound(_))
        ));
    }

    #[tokio::test]
    async fn upsert_then_get_resolves_names() {
        let f = fixture().await;
        MenuService::upsert(&f.pool, "2024-01-01", full(&f)).await.unwrap();

        let menu = MenuService::get_by_date(&f.pool, "2024-01-01").await.unwrap();
        assert_eq!(
            menu,
            MenuView {
                date: "2024-01-01".into(),
                breakfast: Some("Pancakes".into()),
                lunch: Some("Soup".into()),
                dinner: Some("Pasta".into()),
            }
        );
    }

    #[tokio::test]
    async fn null_slots_are_distinct_from_missing_menu() {
        let f = fixture().await;
        MenuService::upsert(&f.pool, "2024-01-02", MenuSlots::default()).await.unwrap();

        let menu = MenuService::get_by_date(&f.pool, "2024-01-02").await.unwrap();
        assert_eq!(menu.breakfast, None);
        assert_eq!(menu.lunch, None);
        assert_eq!(menu.dinner, None);
    }

    #[tokio::test]
    async fn upsert_overwrites_every_slot() {
        let f = fixture().await;
        MenuService::upsert(&f.pool, "2024-01-01", full(&f)).await.unwrap();
        MenuService::upsert(
            &f.pool,
            "2024-01-01",
            MenuSlots { lunch_id: Some(f.soup), ..Default::default() },
        )
        .await
        .unwrap();

        let row = MenuService::get_row(&f.pool, "2024-01-01").await.unwrap();
        assert_eq!(row.breakfast_id, None);
        assert_eq!(row.lunch_id, Some(f.soup));
        assert_eq!(row.dinner_id, None);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus")
            .fetch_one(&f.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn set_slot_touches_only_its_column() {
        let f = fixture().await;
        let stew = MealService::create(&f.pool, "Stew", Category::Lunch).await.unwrap();
        MenuService::upsert(&f.pool, "2024-01-01", full(&f)).await.unwrap();

        MenuService::set_slot(&f.pool, "2024-01-01", Category::Lunch, stew).await.unwrap();

        let row = MenuService::get_row(&f.pool, "2024-01-01").await.unwrap();
        assert_eq!(row.slot(Category::Breakfast), Some(f.pancakes));
        assert_eq!(row.slot(Category::Lunch), Some(stew));
        assert_eq!(row.slot(Category::Dinner), Some(f.pasta));
    }

    #[tokio::test]
    async fn set_slot_never_creates_a_menu() {
        let f = fixture().await;
        let err = MenuService::set_slot(&f.pool, "2030-12-31", Category::Dinner, f.pasta)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MenuNotFound(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus")
            .fetch_one(&f.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
