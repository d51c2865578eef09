//! # Domain Errors
//!
//! ```text
//! ValidationError ─┐
//!                  ├──► CoreError ──► AppError (CLI) ──► console line
//!      rule checks ┘                        ▲
//!                                 DbError ──┘
//! ```
//!
//! `ValidationError` covers a single typed value (a price, a coordinate, a
//! unit count). `CoreError` covers rules that need rows: stock, distance,
//! store ownership, user type.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// A rule the request broke.
///
/// Display strings keep ids and counts for the log. The console prints the
/// shorter wording of each menu screen instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid storeID: {0}")]
    StoreNotFound(i64),

    /// Stores carry products by name; this one does not.
    #[error("Product not found in the store: {product} (store {store_id})")]
    ProductNotFound { store_id: i64, product: String },

    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(i64),

    /// Raised both by the menu's pre-check and by the order transaction when
    /// another session bought the last units first.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Orders only go to stores inside the delivery radius.
    #[error("Store {store_id} is not within a {radius}-mile radius (distance {distance:.2})")]
    StoreOutOfRange {
        store_id: i64,
        distance: f64,
        radius: f64,
    },

    #[error("You do not manage store {store_id}")]
    NotStoreManager { store_id: i64 },

    #[error("You do not manage any stores.")]
    NoManagedStores,

    #[error("You do not have admin privileges.")]
    AdminRequired,

    #[error("UserName or password is wrong!")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single value typed at the console failed its check. Raised before any
/// SQL runs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Latitude, longitude, and similar bounded numbers.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Stock counts may be zero.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// User types and other closed vocabularies.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
