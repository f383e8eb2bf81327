use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

/// Opens the pool and brings the `todos` table in line with the entity
/// definitions. The returned handle is owned by `AppState` for the life of the
/// process and closed explicitly on shutdown.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(cfg.connect_timeout())
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("syncing database schema from entities");
    db.get_schema_registry("todo_board::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}

pub async fn close(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => info!("database pool closed"),
        Err(err) => tracing::warn!(error = %err, "failed to close database pool cleanly"),
    }
}
