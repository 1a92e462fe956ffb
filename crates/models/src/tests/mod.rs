use sea_orm::{Database, DatabaseConnection};
use migration::MigratorTrait;


/// Fresh in-memory database with the schema migrated
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
