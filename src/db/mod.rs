use std::{path::Path, str::FromStr, time::Duration};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

pub async fn create_pool(path: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Single-connection in-memory store. The connection is never recycled,
/// otherwise the database would vanish with it.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the `meals` and `menus` tables (idempotent — safe to call on every startup).
pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    // --- Meals ---
    sqlx::raw_sql(
        r#"CREATE TABLE IF NOT EXISTS meals (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            name      TEXT NOT NULL,
            category  TEXT NOT NULL CHECK (category IN ('breakfast', 'lunch', 'dinner')),
            UNIQUE (name, category)
        )"#,
    )
    .execute(pool)
    .await?;

    // --- Menus ---
    sqlx::raw_sql(
        r#"CREATE TABLE IF NOT EXISTS menus (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            date          TEXT NOT NULL UNIQUE,
            breakfast_id  INTEGER REFERENCES meals(id),
            lunch_id      INTEGER REFERENCES meals(id),
            dinner_id     INTEGER REFERENCES meals(id)
        )"#,
    )
    .execute(pool)
    .await?;

    // A slot may only hold a meal of its own category.
    for (event, name) in [("INSERT", "menus_slot_category_insert"), ("UPDATE", "menus_slot_category_update")] {
        sqlx::raw_sql(&format!(
            r#"CREATE TRIGGER IF NOT EXISTS {name}
               BEFORE {event} ON menus
               WHEN (NEW.breakfast_id IS NOT NULL
                     AND (SELECT category FROM meals WHERE id = NEW.breakfast_id) IS NOT 'breakfast')
                 OR (NEW.lunch_id IS NOT NULL
                     AND (SELECT category FROM meals WHERE id = NEW.lunch_id) IS NOT 'lunch')
                 OR (NEW.dinner_id IS NOT NULL
                     AND (SELECT category FROM meals WHERE id = NEW.dinner_id) IS NOT 'dinner')
               BEGIN
                   SELECT RAISE(ABORT, 'menu slot references a meal from another category');
               END"#
        ))
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('meals', 'menus') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["meals".to_string(), "menus".to_string()]);
    }

    #[tokio::test]
    async fn slot_rejects_meal_from_another_category() {
        let pool = connect_in_memory().await.unwrap();
        init_schema(&pool).await.unwrap();

        let breakfast_id = sqlx::query("INSERT INTO meals (name, category) VALUES ('Pancakes', 'breakfast')")
            .execute(&pool)
            .await
            .unwrap()
            .last_insert_rowid();

        let res = sqlx::query("INSERT INTO menus (date, lunch_id) VALUES ('2024-01-01', ?)")
            .bind(breakfast_id)
            .execute(&pool)
            .await;
        assert!(res.is_err());

        sqlx::query("INSERT INTO menus (date, breakfast_id) VALUES ('2024-01-01', ?)")
            .bind(breakfast_id)
            .execute(&pool)
            .await
            .unwrap();

        let res = sqlx::query("UPDATE menus SET dinner_id = ? WHERE date = '2024-01-01'")
            .bind(breakfast_id)
            .execute(&pool)
            .await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn category_outside_enum_is_rejected() {
        let pool = connect_in_memory().await.unwrap();
        init_schema(&pool).await.unwrap();

        let res = sqlx::query("INSERT INTO meals (name, category) VALUES ('Cake', 'brunch')")
            .execute(&pool)
            .await;
        assert!(res.is_err());
    }
}
