//! Meal catalogue seed script
//!
//! Loads meals from a JSON file into the menu store, skipping meals that
//! already exist in their category.
//!
//! File format:
//!   { "breakfast": ["Pancakes"], "lunch": ["Soup", "Salad"], "dinner": ["Pasta"] }
//!
//! Usage:
//!   seed-meals --file meals.json [--database menus.db]
//!
//! Environment variables:
//!   DATABASE_PATH  — store file used when --database is not given (default: menus.db)

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use menu_calendar_api::{
    db,
    error::AppError,
    models::meal::Category,
    services::meals::MealService,
};

#[derive(Parser)]
#[command(name = "seed-meals", about = "Load meals from a JSON file into the menu store")]
struct Args {
    /// JSON file mapping each category to a list of meal names
    #[arg(long)]
    file: PathBuf,

    /// SQLite file to seed (falls back to DATABASE_PATH)
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let database = args
        .database
        .or_else(|| std::env::var("DATABASE_PATH").ok())
        .unwrap_or_else(|| "menus.db".to_string());

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let catalogue: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&raw).context("Meal file is not a valid catalogue")?;

    let pool = db::create_pool(&database, 1)
        .await
        .with_context(|| format!("Failed to open {database}"))?;
    db::init_schema(&pool).await.context("Failed to create schema")?;

    let (inserted, skipped) = seed(&pool, &catalogue).await?;

    println!("Seeded {database}: {inserted} inserted, {skipped} already present");
    pool.close().await;
    Ok(())
}

async fn seed(
    pool: &sqlx::SqlitePool,
    catalogue: &BTreeMap<String, Vec<String>>,
) -> Result<(usize, usize)> {
    let mut inserted = 0;
    let mut skipped = 0;

    for (key, names) in catalogue {
        let category: Category = key.parse()?;
        for name in names.iter().filter(|n| !n.is_empty()) {
            match MealService::create(pool, name, category).await {
                Ok(_) => inserted += 1,
                Err(e @ AppError::DuplicateMeal { .. }) => {
                    tracing::info!("Skipping: {e}");
                    skipped += 1;
                }
                Err(e) => return Err(e).with_context(|| format!("Failed to insert meal {name}")),
            }
        }
    }

    Ok((inserted, skipped))
}
