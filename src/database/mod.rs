use anyhow::Result;
use sqlx::{Sqlite, migrate::MigrateDatabase, sqlite::SqlitePool};

pub mod defaults;
pub mod models;
pub mod stores;
pub mod tiered;

pub use tiered::{LoadSource, TieredStore};

pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    // Create database if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        log::info!("Creating database {}", database_url);
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePool::connect(database_url).await?;

    log::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
