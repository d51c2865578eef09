//! # Validation Module
//!
//! Input validation for everything typed at the console.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Prompt (CLI)                                                 │
//! │  └── Parse "12" / "12.5" / "Pepsi" into typed values                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Ranges, lengths, signs                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE / CHECK constraints                             │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_ORDER_UNITS, MAX_PRICE_CENTS, MAX_STOCK_UNITS, MAX_SUPPLY_UNITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted user name.
pub const MAX_USER_NAME_LEN: usize = 50;

/// Longest accepted password.
pub const MAX_PASSWORD_LEN: usize = 128;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 30;

/// Grid bounds for latitude and longitude.
pub const COORDINATE_MIN: f64 = 0.0;
pub const COORDINATE_MAX: f64 = 100.0;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a user name.
///
/// ```rust
/// use storefront_core::validation::validate_user_name;
///
/// assert!(validate_user_name("amy").is_ok());
/// assert!(validate_user_name("   ").is_err());
/// ```
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_USER_NAME_LEN)
}

/// Validates a password. Whitespace-only passwords are rejected.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::required("password"));
    }

    if password.chars().count() > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("product name", name, MAX_PRODUCT_NAME_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a latitude or longitude.
///
/// ## Rules
/// - Must be a finite number
/// - Must be within `[0.0, 100.0]`
pub fn validate_coordinate(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || !(COORDINATE_MIN..=COORDINATE_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: COORDINATE_MIN,
            max: COORDINATE_MAX,
        });
    }

    Ok(())
}

/// Validates the number of units in an order.
///
/// ## User Workflow
/// ```text
/// Enter the number of units: 5
///       │
///       ▼
/// validate_order_units(5) ← THIS FUNCTION
///       │
///       ├── units <= 0?   → "number of units must be positive"
///       ├── units > 999?  → "number of units must be between 1 and 999"
///       └── OK → stock check against the store
/// ```
pub fn validate_order_units(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "number of units".to_string(),
        });
    }

    if units > MAX_ORDER_UNITS {
        return Err(ValidationError::OutOfRange {
            field: "number of units".to_string(),
            min: 1.0,
            max: MAX_ORDER_UNITS as f64,
        });
    }

    Ok(())
}

/// Validates a stock level set by a manager. Zero is allowed (sold out).
pub fn validate_stock_level(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "number of units".to_string(),
        });
    }

    if units > MAX_STOCK_UNITS {
        return Err(stock_out_of_range());
    }

    Ok(())
}

/// Error for a stock level above `MAX_STOCK_UNITS`, also raised when a supply
/// request would push stock past it.
pub fn stock_out_of_range() -> ValidationError {
    ValidationError::OutOfRange {
        field: "number of units".to_string(),
        min: 0.0,
        max: MAX_STOCK_UNITS as f64,
    }
}

/// Validates a price in cents. Zero is allowed (free items).
///
/// ```rust
/// use storefront_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(100_000_001).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price per unit".to_string(),
        });
    }

    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price per unit".to_string(),
            min: 0.0,
            max: MAX_PRICE_CENTS as f64 / 100.0,
        });
    }

    Ok(())
}

/// Validates the number of units in a supply request.
pub fn validate_supply_units(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "units requested".to_string(),
        });
    }

    if units > MAX_SUPPLY_UNITS {
        return Err(ValidationError::OutOfRange {
            field: "units requested".to_string(),
            min: 1.0,
            max: MAX_SUPPLY_UNITS as f64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
