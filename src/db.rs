use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Opens the SQLite database at [db_path], creating the file (and its parent
/// directory, if the path names one) when it does not exist yet.
pub async fn connect_sqlite(db_path: &str) -> Result<SqlitePool, anyhow::Error> {
    if let Some(db_dir) = Path::new(db_path).parent() {
        if !db_dir.as_os_str().is_empty() {
            fs::create_dir_all(db_dir)
                .with_context(|| format!("creating database directory {}", db_dir.display()))?;
        }
    }

    let connect_options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(2))
        .connect_with(connect_options)
        .await
        .with_context(|| format!("opening the sqlite database at {db_path}"))
}

/// Creates the todos table if it is absent. Safe to run on every startup.
pub async fn init_schema(db: &SqlitePool) -> Result<(), anyhow::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS todos ( \
            id INTEGER PRIMARY KEY AUTOINCREMENT, \
            task TEXT NOT NULL, \
            completed INTEGER DEFAULT 0, \
            created_at TEXT NOT NULL \
        )",
    )
    .execute(db)
    .await
    .context("creating the todos table")?;

    Ok(())
}
