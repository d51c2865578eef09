//! # storefront-core: Pure Domain Logic for Storefront
//!
//! This crate holds every rule of the retail system that does not need a
//! database or a terminal: the domain types, integer money, the store
//! distance check, and input validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-cli (menu loop)                     │   │
//! │  │   login menu ──► user menu ──► admin menu                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │    geo    │  │ validation│  │   │
//! │  │   │  Store    │  │   Money   │  │ GeoPoint  │  │   rules   │  │   │
//! │  │   │  Order    │  │  parse    │  │ distance  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Store, Product, Order, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`geo`] - Coordinates and the nearby-store radius check
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::geo::{GeoPoint, NEARBY_RADIUS_MILES};
//! use storefront_core::money::Money;
//!
//! let price = Money::parse("10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let home = GeoPoint::new(10.0, 10.0);
//! let store = GeoPoint::new(13.0, 14.0);
//! assert_eq!(home.distance_to(&store), 5.0);
//! assert!(home.is_within(&store, NEARBY_RADIUS_MILES));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod geo;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use geo::GeoPoint;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum units a customer may order in one order.
///
/// Guards against typing 10000 instead of 10.
pub const MAX_ORDER_UNITS: i64 = 999;

/// Most units one product row may hold. Supply requests that would push stock
/// past this are refused, so SQLite's integer addition can never overflow.
pub const MAX_STOCK_UNITS: i64 = 1_000_000_000;

/// Most units one supply request may ask a warehouse for.
pub const MAX_SUPPLY_UNITS: i64 = 1_000_000;

/// Highest price per unit, in cents ($1,000,000.00). Keeps
/// `price * MAX_ORDER_UNITS` far inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Number of rows shown by the "recent" and "popular" reports.
pub const DEFAULT_REPORT_LIMIT: u32 = 5;
