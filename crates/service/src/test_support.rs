#![cfg(test)]
use sea_orm::{Database, DatabaseConnection};
use migration::MigratorTrait;

/// Fresh in-memory database per test, migrated to the latest schema.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
