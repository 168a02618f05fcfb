use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);
    // every pooled connection to an in-memory database would see its own empty schema
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;

    for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA foreign_keys=ON"] {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }

    Migrator::up(&db, None).await?;
    tracing::debug!("database migrated");
    Ok(db)
}
