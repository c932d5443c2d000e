//! SQLite connection pool factory and the module migration runner.

use std::str::FromStr;

use shelf_kernel::settings::DatabaseSettings;
use shelf_kernel::Migration;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub type DbPool = sqlx::SqlitePool;

const MEMORY_URL: &str = "sqlite::memory:";

const CREATE_LEDGER: &str = r#"
CREATE TABLE IF NOT EXISTS _shelf_migrations (
    module     TEXT NOT NULL,
    id         TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (module, id)
)
"#;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid database url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("migration {module}/{id} failed: {source}")]
    Migration {
        module: String,
        id: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Create a connection pool from the database settings.
///
/// File databases are created on first use. In-memory databases are pinned to
/// a single connection that is never reaped, since every SQLite connection to
/// `:memory:` opens its own empty database.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<DbPool, DbError> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|source| DbError::InvalidUrl {
            url: settings.url.clone(),
            source,
        })?
        .create_if_missing(true);

    let pool_options = if settings.url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(DbError::Connect)?;

    tracing::info!(target: "shelf-db", url = %settings.url, "database pool ready");
    Ok(pool)
}

/// Create a private in-memory database.
pub async fn create_memory_pool() -> Result<DbPool, DbError> {
    create_pool(&DatabaseSettings {
        url: MEMORY_URL.to_string(),
        max_connections: 1,
    })
    .await
}

/// Apply every migration not yet recorded in the ledger, in the given order.
///
/// Each migration runs in its own transaction together with its ledger
/// insert. Returns the number of migrations applied by this call.
pub async fn run_migrations(
    pool: &DbPool,
    migrations: &[(String, Migration)],
) -> Result<usize, DbError> {
    sqlx::query(CREATE_LEDGER).execute(pool).await?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let recorded: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM _shelf_migrations WHERE module = ? AND id = ?")
                .bind(module.as_str())
                .bind(migration.id)
                .fetch_optional(pool)
                .await?;

        if recorded.is_some() {
            tracing::debug!(target: "shelf-db", %module, id = migration.id, "migration already applied");
            continue;
        }

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|source| DbError::Migration {
                module: module.clone(),
                id: migration.id,
                source,
            })?;
        sqlx::query("INSERT INTO _shelf_migrations (module, id) VALUES (?, ?)")
            .bind(module.as_str())
            .bind(migration.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(target: "shelf-db", %module, id = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
