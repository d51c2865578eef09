//! # Domain Types
//!
//! Core domain types used throughout Storefront.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Store      │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  user_id        │◄──│  manager_id     │   │  store_id  (PK) │       │
//! │  │  name (unique)  │   │  store_id       │◄──│  product_name   │       │
//! │  │  user_type      │   │  lat / lon      │   │  units, price   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │          ▲                     ▲                      ▲                 │
//! │          │                     │                      │                 │
//! │  ┌───────┴─────────┐   ┌───────┴─────────┐   ┌────────┴────────┐       │
//! │  │     Order       │   │ ProductUpdate   │   │ SupplyRequest   │       │
//! │  │  customer_id    │   │  manager_id     │   │  manager_id     │       │
//! │  │  units_ordered  │   │  updated_on     │   │  warehouse_id   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are identified by `(store_id, product_name)`: the same name in two
//! stores is two different products.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::geo::GeoPoint;
use crate::money::Money;
use crate::validation::{
    validate_order_units, validate_password, validate_price_cents, validate_product_name,
    validate_stock_level, validate_supply_units, validate_user_name,
};

// =============================================================================
// User Type
// =============================================================================

/// Role of an account.
///
/// Stored lowercase in the `users.user_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Self-registered shopper.
    #[default]
    Customer,
    /// Runs one or more stores.
    Manager,
    /// Full access to the admin menu.
    Admin,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Customer, UserType::Manager, UserType::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "customer",
            UserType::Manager => "manager",
            UserType::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = ValidationError;

    /// Case-insensitive, so "Customer" and "ADMIN" both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        UserType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "user type".to_string(),
                allowed: UserType::ALL.iter().map(|t| t.to_string()).collect(),
            })
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub user_id: i64,
    pub name: String,
    /// Argon2 PHC string. Never printed.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub latitude: f64,
    pub longitude: f64,
    pub user_type: UserType,
}

impl User {
    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

/// Input for "Create user".
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub password: String,
    pub location: GeoPoint,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_user_name(&self.name)?;
        validate_password(&self.password)?;
        GeoPoint::checked(self.location.latitude, self.location.longitude)?;
        Ok(())
    }
}

/// Input for the admin "Update user information" screen.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub password: String,
    pub location: GeoPoint,
    pub user_type: UserType,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_user_name(&self.name)?;
        validate_password(&self.password)?;
        GeoPoint::checked(self.location.latitude, self.location.longitude)?;
        Ok(())
    }
}

// =============================================================================
// Session
// =============================================================================

/// A persisted login. Open while `ended_at` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Session {
    pub session_id: String,
    pub user_id: i64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Session {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

// =============================================================================
// Store
// =============================================================================

/// A retail location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Store {
    pub store_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub manager_id: i64,
    pub date_established: NaiveDate,
}

impl Store {
    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Distance from `origin`, or `StoreOutOfRange` when it exceeds `radius`.
    pub fn ensure_within(&self, origin: GeoPoint, radius: f64) -> CoreResult<f64> {
        let distance = origin.distance_to(&self.location());
        if distance > radius {
            return Err(CoreError::StoreOutOfRange {
                store_id: self.store_id,
                distance,
                radius,
            });
        }
        Ok(distance)
    }
}

/// A store paired with its distance from the viewer.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyStore {
    #[serde(flatten)]
    pub store: Store,
    pub distance: f64,
}

// =============================================================================
// Product
// =============================================================================

/// Stock of one product name in one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub store_id: i64,
    pub product_name: String,
    pub number_of_units: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_per_unit_cents"))]
    pub price_per_unit: Money,
}

impl Product {
    /// True when the store holds at least `units`.
    #[inline]
    pub fn can_fulfil(&self, units: i64) -> bool {
        units <= self.number_of_units
    }

    pub fn ensure_stock(&self, units: i64) -> CoreResult<()> {
        if !self.can_fulfil(units) {
            return Err(CoreError::InsufficientStock {
                product: self.product_name.clone(),
                available: self.number_of_units,
                requested: units,
            });
        }
        Ok(())
    }
}

/// New stock level and price set by a manager or admin.
#[derive(Debug, Clone, Copy)]
pub struct ProductChange {
    pub number_of_units: i64,
    pub price_per_unit: Money,
}

impl ProductChange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_stock_level(self.number_of_units)?;
        validate_price_cents(self.price_per_unit.cents())?;
        Ok(())
    }
}

// =============================================================================
// Warehouse
// =============================================================================

/// Source of supply requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Warehouse {
    pub warehouse_id: i64,
    pub area: String,
    pub latitude: f64,
    pub longitude: f64,
}

// =============================================================================
// Order
// =============================================================================

/// A customer purchase. Placing one reduces the product's stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub order_number: i64,
    pub customer_id: i64,
    pub store_id: i64,
    pub product_name: String,
    pub units_ordered: i64,
    pub order_time: DateTime<Utc>,
}

/// "View 5 recent orders" row: an order priced at the product's current
/// price per unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RecentOrder {
    pub order_number: i64,
    pub customer_id: i64,
    pub store_id: i64,
    pub product_name: String,
    pub units_ordered: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_per_unit_cents"))]
    pub price_per_unit: Money,
    pub order_time: DateTime<Utc>,
}

impl RecentOrder {
    /// `price_per_unit * units_ordered`, saturating.
    pub fn total(&self) -> Money {
        self.price_per_unit * self.units_ordered
    }
}

/// Input for "Place a Order".
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i64,
    pub store_id: i64,
    pub product_name: String,
    pub units: i64,
}

impl NewOrder {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_product_name(&self.product_name)?;
        validate_order_units(self.units)?;
        Ok(())
    }
}

// =============================================================================
// Product Update
// =============================================================================

/// Audit row written whenever a manager changes a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductUpdate {
    pub update_number: i64,
    pub manager_id: i64,
    pub store_id: i64,
    pub product_name: String,
    pub updated_on: DateTime<Utc>,
}

/// A product update joined with the product's current values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RecentUpdate {
    pub store_id: i64,
    pub product_name: String,
    pub new_units: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "new_price_cents"))]
    pub new_price: Money,
    pub updated_on: DateTime<Utc>,
}

// =============================================================================
// Supply Request
// =============================================================================

/// A manager-initiated stock replenishment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SupplyRequest {
    pub request_id: i64,
    pub manager_id: i64,
    pub warehouse_id: i64,
    pub store_id: i64,
    pub product_name: String,
    pub units_requested: i64,
    pub requested_at: DateTime<Utc>,
}

/// Input for "Place Product Supply Request to Warehouse".
#[derive(Debug, Clone)]
pub struct NewSupplyRequest {
    pub manager_id: i64,
    pub warehouse_id: i64,
    pub store_id: i64,
    pub product_name: String,
    pub units: i64,
}

impl NewSupplyRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_product_name(&self.product_name)?;
        validate_supply_units(self.units)?;
        Ok(())
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// "View 5 Popular Items" row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PopularProduct {
    pub product_name: String,
    pub order_count: i64,
}

/// "View 5 Popular Customers" row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PopularCustomer {
    pub user_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub user_type: UserType,
    pub order_count: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
