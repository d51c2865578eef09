//! # Console Error Type
//!
//! Unified error type for menu operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Storefront                             │
//! │                                                                         │
//! │  Menu choice                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Operation                                                       │  │
//! │  │  Result<(), AppError>                                            │  │
//! │  │         │                                                        │  │
//! │  │  Business rule? ── CoreError::StoreNotFound ──► AppError ───────►│  │
//! │  │         │                                       (Rejected)       │  │
//! │  │  Database error? ─ DbError::QueryFailed ──────► AppError ───────►│  │
//! │  │         │                                       (Database)       │  │
//! │  │  Bad number? ───── "abc" for storeID ─────────► AppError ───────►│  │
//! │  │                                                 (InvalidInput)   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Rejected      → printed as is:      "Invalid storeID."                │
//! │  anything else → printed with prefix "Error: Database operation failed"│
//! │  EndOfInput    → never printed, the program shuts down                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};
use storefront_db::DbError;
use thiserror::Error;

/// Error returned from menu operations.
///
/// ## Serialization
/// With `--format json` a failed operation is reported as:
/// ```json
/// { "code": "NOT_FOUND", "message": "Product not found: 3/Pepsi" }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[error("{message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for the console
    pub message: String,
}

/// Error codes for console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A business rule refused the operation ("Insufficient stock.")
    Rejected,

    /// Entity not found
    NotFound,

    /// Typed input could not be parsed or failed validation
    InvalidInput,

    /// Name already taken, or stock changed underneath an order
    Conflict,

    /// Database operation failed
    DatabaseError,

    /// Reading the console or writing output failed
    Io,

    /// Standard input closed (Ctrl-D)
    EndOfInput,

    Internal,
}

impl AppError {
    /// Creates a new console error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// A refused operation. Printed without the `Error: ` prefix.
    pub fn rejected(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Rejected, message)
    }

    /// Creates an input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidInput, message)
    }

    pub fn end_of_input() -> Self {
        AppError::new(ErrorCode::EndOfInput, "end of input")
    }

    pub fn is_end_of_input(&self) -> bool {
        self.code == ErrorCode::EndOfInput
    }

    /// The line shown to the user.
    pub fn console_line(&self) -> String {
        match self.code {
            ErrorCode::Rejected => self.message.clone(),
            _ => format!("Error: {}", self.message),
        }
    }
}

/// Converts database errors to console errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                AppError::new(ErrorCode::NotFound, format!("{entity} not found: {id}"))
            }
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::Conflict,
                format!("{field} '{value}' already exists"),
            ),
            DbError::Conflict(message) => AppError::new(ErrorCode::Conflict, message),
            DbError::Validation(e) => AppError::from(e),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                AppError::new(ErrorCode::InvalidInput, "Invalid reference")
            }
            DbError::CheckViolation { message } => {
                tracing::error!("Check constraint violation: {}", message);
                AppError::new(ErrorCode::InvalidInput, "Value out of range")
            }
            DbError::PasswordHash(e) => {
                tracing::error!("Password hashing failed: {}", e);
                AppError::new(ErrorCode::Internal, "Could not store password")
            }
            DbError::ConnectionFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but show a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts business rule violations to the wording of the menu screens.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        tracing::debug!(error = %err, "Operation rejected");

        match err {
            CoreError::StoreNotFound(_) => AppError::rejected("Invalid storeID."),
            CoreError::StoreOutOfRange { radius, .. } => {
                AppError::rejected(format!("Store is not within a {radius}-mile radius."))
            }
            CoreError::ProductNotFound { .. } => {
                AppError::rejected("Product not found in the store.")
            }
            CoreError::InsufficientStock { .. } => AppError::rejected("Insufficient stock."),
            CoreError::NotStoreManager { .. } => AppError::rejected(
                "You do not have permission to update products in this store.",
            ),
            CoreError::UserNotFound(_) => AppError::rejected("User not found."),
            CoreError::WarehouseNotFound(id) => {
                AppError::rejected(format!("Warehouse {id} not found."))
            }
            CoreError::NoManagedStores
            | CoreError::AdminRequired
            | CoreError::InvalidCredentials => AppError::rejected(err.to_string()),
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::invalid_input(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::Io, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::new(ErrorCode::Internal, format!("JSON encoding failed: {err}"))
    }
}

/// Result type for menu operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_print_bare() {
        let err = AppError::from(CoreError::StoreNotFound(4));
        assert_eq!(err.code, ErrorCode::Rejected);
        assert_eq!(err.console_line(), "Invalid storeID.");

        let err = AppError::from(CoreError::StoreOutOfRange {
            store_id: 4,
            distance: 31.0,
            radius: 30.0,
        });
        assert_eq!(err.console_line(), "Store is not within a 30-mile radius.");
    }

    #[test]
    fn test_db_errors_print_with_prefix() {
        let err = AppError::from(DbError::QueryFailed("near \"SELEC\": syntax error".into()));
        assert_eq!(err.console_line(), "Error: Database operation failed");

        let err = AppError::from(DbError::duplicate("name", "amy"));
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.console_line(), "Error: name 'amy' already exists");
    }

    #[test]
    fn test_validation_is_invalid_input() {
        let err = AppError::from(CoreError::Validation(ValidationError::MustBePositive {
            field: "number of units".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.console_line(), "Error: number of units must be positive");
    }

    #[test]
    fn test_json_shape() {
        let err = AppError::new(ErrorCode::NotFound, "Product not found: 3/Pepsi");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"NOT_FOUND","message":"Product not found: 3/Pepsi"}"#
        );
    }
}
