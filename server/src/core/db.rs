//! Database - Apertura del pool SQLite e migrazioni

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

/// Apre il pool ed esegue le migrazioni.
///
/// Un database in memoria vive finché resta aperta la sua unica connessione,
/// quindi in quel caso il pool tiene una sola connessione che non scade mai.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:");
    let mut options = SqlitePoolOptions::new();
    options = if in_memory {
        options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options.max_connections(max_connections)
    };

    let pool = options.connect(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database ready ({} connection(s) max)", if in_memory { 1 } else { max_connections });

    Ok(pool)
}
