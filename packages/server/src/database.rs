use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("pdfchat_server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Fresh in-memory SQLite database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_db() -> DatabaseConnection {
    // One connection: every pooled connection to `sqlite::memory:` is a separate database.
    init_db(&DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
    })
    .await
    .unwrap()
}
