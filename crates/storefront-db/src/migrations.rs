//! # Schema Migrations
//!
//! ```text
//! migrations/sqlite/
//! ├── 001_initial_schema.sql   # users, sessions, stores, products, orders,
//! │                            # warehouses, supply requests, update log
//! └── 002_report_indexes.sql   # lookups behind the manager reports
//! ```
//!
//! The files are compiled into the binary. A schema change is a new file
//! with the next number; applied files stay as they are, since sqlx checks
//! their checksums on every start.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies whatever the database has not seen yet.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let (known, applied) = migration_status(pool).await?;
    if applied >= known {
        debug!(known, "Schema already current");
        return Ok(());
    }

    MIGRATOR.run(pool).await?;
    info!(pending = known - applied, "Applied schema migrations");
    Ok(())
}

/// `(known, applied)` migration counts.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let known = MIGRATOR.migrations.len();

    let tracked: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations')",
    )
    .fetch_one(pool)
    .await?;
    if !tracked {
        return Ok((known, 0));
    }

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await?;

    Ok((known, usize::try_from(applied).unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_fresh_database_is_current() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(migration_status(db.pool()).await.unwrap(), (2, 2));

        run_migrations(db.pool()).await.unwrap();
        assert_eq!(migration_status(db.pool()).await.unwrap(), (2, 2));
    }

    #[tokio::test]
    async fn test_skipped_migrations_run_later() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();
        assert_eq!(migration_status(db.pool()).await.unwrap(), (2, 0));

        db.run_migrations().await.unwrap();
        assert_eq!(migration_status(db.pool()).await.unwrap(), (2, 2));
    }

    #[tokio::test]
    async fn test_status_reports_query_failures() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(matches!(
            migration_status(db.pool()).await,
            Err(DbError::ConnectionFailed(_))
        ));
    }
}
