//! # Store Repository
//!
//! Store lookups and the "stores within 30 miles" search.
//!
//! ## Proximity Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  nearby(user.location(), 30.0)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT * FROM stores            (coordinates live on a 0..100 grid,   │
//! │       │                           SQLite has no trig functions)        │
//! │       ▼                                                                 │
//! │  GeoPoint::is_within(radius)     ← same rule the order check uses      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sort by distance, then store_id                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use storefront_core::{GeoPoint, NearbyStore, Store};

const STORE_COLUMNS: &str = "store_id, name, latitude, longitude, manager_id, date_established";

/// Repository for stores.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Lists every store ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores ORDER BY store_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    /// Gets a store by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Store))` - Store found
    /// * `Ok(None)` - No such store
    pub async fn get_by_id(&self, store_id: i64) -> DbResult<Option<Store>> {
        debug!(store_id, "Fetching store");

        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores WHERE store_id = ?1"
        ))
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Stores whose manager is `manager_id`, ordered by id.
    pub async fn managed_by(&self, manager_id: i64) -> DbResult<Vec<Store>> {
        debug!(manager_id, "Fetching managed stores");

        let stores = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores WHERE manager_id = ?1 ORDER BY store_id"
        ))
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    /// Stores within `radius` miles of `origin` (boundary inclusive),
    /// nearest first.
    pub async fn nearby(&self, origin: GeoPoint, radius: f64) -> DbResult<Vec<NearbyStore>> {
        debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            radius,
            "Searching nearby stores"
        );

        let mut nearby: Vec<NearbyStore> = self
            .list_all()
            .await?
            .into_iter()
            .filter(|store| origin.is_within(&store.location(), radius))
            .map(|store| NearbyStore {
                distance: origin.distance_to(&store.location()),
                store,
            })
            .collect();

        nearby.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.store.store_id.cmp(&b.store.store_id))
        });

        debug!(count = nearby.len(), "Nearby search returned stores");
        Ok(nearby)
    }

    /// Inserts a store. The manager must be an existing user.
    pub async fn insert(
        &self,
        name: &str,
        location: GeoPoint,
        manager_id: i64,
        date_established: NaiveDate,
    ) -> DbResult<Store> {
        let location = GeoPoint::checked(location.latitude, location.longitude)?;

        debug!(name = %name, manager_id, "Inserting store");

        let result = sqlx::query(
            r#"
            INSERT INTO stores (name, latitude, longitude, manager_id, date_established)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(name)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(manager_id)
        .bind(date_established)
        .execute(&self.pool)
        .await?;

        let store_id = result.last_insert_rowid();
        info!(store_id, manager_id, "Store created");

        self.get_by_id(store_id)
            .await?
            .ok_or_else(|| DbError::not_found("Store", store_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
