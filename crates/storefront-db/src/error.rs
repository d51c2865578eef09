//! # Repository Errors
//!
//! ```text
//! sqlx::Error ──► DbError ──► AppError (CLI) ──► "Error: name 'amy' already exists"
//! ```
//!
//! Constraint failures are classified with sqlx's `ErrorKind`, so callers can
//! tell a taken user name from a missing warehouse without parsing SQLite
//! message text. Repositories that know which column was hit replace the
//! generic variant with a specific one (`DbError::duplicate("name", ..)`).

use sqlx::error::ErrorKind;
use storefront_core::ValidationError;
use thiserror::Error;

/// Failure of a repository call.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row with that key (unknown user id, product not carried by the
    /// store, closed session).
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A UNIQUE column already holds the value.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A row points at a user, store or warehouse that does not exist.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// A CHECK constraint rejected the row (negative stock, off-grid
    /// coordinates).
    #[error("Constraint violation: {message}")]
    CheckViolation { message: String },

    /// Stock fell below the ordered amount between the menu's check and the
    /// write. Nothing was written.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Input rejected before any SQL ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite refused the statement for any other reason.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// No connection became free within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", "?"),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.kind() {
                    // SQLite names the column: "UNIQUE constraint failed: users.name"
                    ErrorKind::UniqueViolation => DbError::UniqueViolation {
                        field: message
                            .rsplit(": ")
                            .next()
                            .unwrap_or("value")
                            .to_string(),
                        value: String::new(),
                    },
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation { message },
                    ErrorKind::CheckViolation => DbError::CheckViolation { message },
                    _ => DbError::QueryFailed(message),
                }
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("database is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_constraint_kinds() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = sqlx::query(
            "INSERT INTO stores (name, latitude, longitude, manager_id, date_established)
             VALUES ('Ghost', 1.0, 1.0, 999, '2020-01-01')",
        )
        .execute(db.pool())
        .await
        .map_err(DbError::from)
        .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        let err = sqlx::query(
            "INSERT INTO users (name, password_hash, latitude, longitude)
             VALUES ('far', 'x', 500.0, 1.0)",
        )
        .execute(db.pool())
        .await
        .map_err(DbError::from)
        .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DbError::not_found("Warehouse", 7).to_string(),
            "Warehouse not found: 7"
        );
        assert_eq!(
            DbError::duplicate("name", "amy").to_string(),
            "Duplicate name: 'amy' already exists"
        );
    }
}
