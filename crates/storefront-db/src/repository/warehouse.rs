//! # Warehouse Repository

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use storefront_core::{GeoPoint, Warehouse};

/// Repository for warehouses.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: SqlitePool,
}

impl WarehouseRepository {
    /// Creates a new WarehouseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WarehouseRepository { pool }
    }

    pub async fn get_by_id(&self, warehouse_id: i64) -> DbResult<Option<Warehouse>> {
        debug!(warehouse_id, "Fetching warehouse");

        let warehouse = sqlx::query_as::<_, Warehouse>(
            "SELECT warehouse_id, area, latitude, longitude FROM warehouses WHERE warehouse_id = ?1",
        )
        .bind(warehouse_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(warehouse)
    }

    pub async fn list_all(&self) -> DbResult<Vec<Warehouse>> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            "SELECT warehouse_id, area, latitude, longitude FROM warehouses ORDER BY warehouse_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(warehouses)
    }

    pub async fn insert(&self, area: &str, location: GeoPoint) -> DbResult<Warehouse> {
        let location = GeoPoint::checked(location.latitude, location.longitude)?;

        let result = sqlx::query(
            "INSERT INTO warehouses (area, latitude, longitude) VALUES (?1, ?2, ?3)",
        )
        .bind(area)
        .bind(location.latitude)
        .bind(location.longitude)
        .execute(&self.pool)
        .await?;

        let warehouse_id = result.last_insert_rowid();
        info!(warehouse_id, area = %area, "Warehouse created");

        self.get_by_id(warehouse_id)
            .await?
            .ok_or_else(|| DbError::not_found("Warehouse", warehouse_id))
    }
}
