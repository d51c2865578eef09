//! # Repository Module
//!
//! Database repository implementations for Storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Menu handler                                                          │
//! │       │                                                                 │
//! │       │  db.orders().place(new_order)                                  │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── place(&self, order)            ← insert + stock decrement, one tx │
//! │  └── recent_for_customer(&self, id, limit)                             │
//! │       │                                                                 │
//! │       │  SQL Query (bound parameters only)                             │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Accounts and authentication
//! - [`session::SessionRepository`] - Persisted login state
//! - [`store::StoreRepository`] - Stores and proximity search
//! - [`product::ProductRepository`] - Per-store inventory and update history
//! - [`order::OrderRepository`] - Customer orders
//! - [`supply::SupplyRepository`] - Warehouse supply requests
//! - [`report::ReportRepository`] - Manager reports
//! - [`warehouse::WarehouseRepository`] - Warehouses

use chrono::{DateTime, SubsecRound, Utc};

pub mod order;
pub mod product;
pub mod report;
pub mod session;
pub mod store;
pub mod supply;
pub mod user;
pub mod warehouse;

#[cfg(test)]
pub(crate) mod fixtures;

/// Current time truncated to whole seconds.
///
/// Timestamps are stored as RFC 3339 text and sorted lexically, which only
/// holds when every value has the same shape.
pub(crate) fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
