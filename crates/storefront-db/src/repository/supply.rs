//! # Supply Repository
//!
//! Product supply requests from a manager to a warehouse. The requested units
//! are added to the store's stock in the same transaction that records the
//! request. Stock never grows past `MAX_STOCK_UNITS`.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::timestamp_now;
use crate::error::{DbError, DbResult};
use storefront_core::validation::stock_out_of_range;
use storefront_core::{NewSupplyRequest, SupplyRequest, MAX_STOCK_UNITS};

/// Repository for supply requests.
#[derive(Debug, Clone)]
pub struct SupplyRepository {
    pool: SqlitePool,
}

impl SupplyRepository {
    /// Creates a new SupplyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplyRepository { pool }
    }

    /// Records a supply request and restocks the product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Unknown warehouse, or the store does not
    ///   carry the product. Nothing is written.
    /// * `Err(DbError::Validation)` - Bad unit count, or the restock would take
    ///   the product past `MAX_STOCK_UNITS`. Nothing is written.
    pub async fn place(&self, request: &NewSupplyRequest) -> DbResult<SupplyRequest> {
        request.validate()?;
        let product_name = request.product_name.trim();

        debug!(
            manager_id = request.manager_id,
            warehouse_id = request.warehouse_id,
            store_id = request.store_id,
            product_name = %product_name,
            units = request.units,
            "Placing supply request"
        );

        let mut tx = self.pool.begin().await?;

        let warehouse: Option<i64> =
            sqlx::query_scalar("SELECT warehouse_id FROM warehouses WHERE warehouse_id = ?1")
                .bind(request.warehouse_id)
                .fetch_optional(&mut *tx)
                .await?;

        if warehouse.is_none() {
            return Err(DbError::not_found("Warehouse", request.warehouse_id));
        }

        let result = sqlx::query(
            r#"
            UPDATE products
            SET number_of_units = number_of_units + ?3
            WHERE store_id = ?1 AND product_name = ?2 AND number_of_units <= ?4 - ?3
            "#,
        )
        .bind(request.store_id)
        .bind(product_name)
        .bind(request.units)
        .bind(MAX_STOCK_UNITS)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let stocked: Option<i64> = sqlx::query_scalar(
                "SELECT number_of_units FROM products WHERE store_id = ?1 AND product_name = ?2",
            )
            .bind(request.store_id)
            .bind(product_name)
            .fetch_optional(&mut *tx)
            .await?;

            return Err(match stocked {
                None => DbError::not_found(
                    "Product",
                    format!("{}/{}", request.store_id, product_name),
                ),
                Some(stocked) => {
                    warn!(
                        store_id = request.store_id,
                        product_name = %product_name,
                        stocked,
                        requested = request.units,
                        "Supply request would overfill stock"
                    );
                    DbError::Validation(stock_out_of_range())
                }
            });
        }

        let requested_at = timestamp_now();

        let result = sqlx::query(
            r#"
            INSERT INTO supply_requests
                (manager_id, warehouse_id, store_id, product_name, units_requested, requested_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(request.manager_id)
        .bind(request.warehouse_id)
        .bind(request.store_id)
        .bind(product_name)
        .bind(request.units)
        .bind(requested_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let stored = SupplyRequest {
            request_id: result.last_insert_rowid(),
            manager_id: request.manager_id,
            warehouse_id: request.warehouse_id,
            store_id: request.store_id,
            product_name: product_name.to_string(),
            units_requested: request.units,
            requested_at,
        };

        info!(
            request_id = stored.request_id,
            store_id = stored.store_id,
            units = stored.units_requested,
            "Supply request placed"
        );

        Ok(stored)
    }

    /// Requests placed by a manager, newest first.
    pub async fn list_for_manager(&self, manager_id: i64) -> DbResult<Vec<SupplyRequest>> {
        debug!(manager_id, "Listing supply requests");

        let requests = sqlx::query_as::<_, SupplyRequest>(
            r#"
            SELECT request_id, manager_id, warehouse_id, store_id, product_name,
                   units_requested, requested_at
            FROM supply_requests
            WHERE manager_id = ?1
            ORDER BY requested_at DESC, request_id DESC
            "#,
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::repository::fixtures;
    use storefront_core::GeoPoint;

    use super::*;

    fn request(manager_id: i64, warehouse_id: i64, store_id: i64, units: i64) -> NewSupplyRequest {
        NewSupplyRequest {
            manager_id,
            warehouse_id,
            store_id,
            product_name: "Pepsi".to_string(),
            units,
        }
    }

    #[tokio::test]
    async fn test_place_restocks() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 5, 199).await;
        let wh = db
            .warehouses()
            .insert("North", GeoPoint::new(1.0, 1.0))
            .await
            .unwrap();

        let placed = db
            .supply()
            .place(&request(mgr.user_id, wh.warehouse_id, store.store_id, 20))
            .await
            .unwrap();
        assert_eq!(placed.units_requested, 20);

        let pepsi = db.products().get(store.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(pepsi.number_of_units, 25);

        let listed = db.supply().list_for_manager(mgr.user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].request_id, placed.request_id);
    }

    #[tokio::test]
    async fn test_unknown_warehouse_writes_nothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 5, 199).await;

        let err = db
            .supply()
            .place(&request(mgr.user_id, 404, store.store_id, 20))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Warehouse"));

        let pepsi = db.products().get(store.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(pepsi.number_of_units, 5);
        assert!(db.supply().list_for_manager(mgr.user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_restock_cannot_pass_stock_ceiling() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", MAX_STOCK_UNITS - 5, 199).await;
        let wh = db
            .warehouses()
            .insert("North", GeoPoint::new(1.0, 1.0))
            .await
            .unwrap();

        let err = db
            .supply()
            .place(&request(mgr.user_id, wh.warehouse_id, store.store_id, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        db.supply()
            .place(&request(mgr.user_id, wh.warehouse_id, store.store_id, 5))
            .await
            .unwrap();

        let pepsi = db.products().get(store.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(pepsi.number_of_units, MAX_STOCK_UNITS);
        assert_eq!(db.supply().list_for_manager(mgr.user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_huge_request_leaves_product_readable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 5, 199).await;
        let wh = db
            .warehouses()
            .insert("North", GeoPoint::new(1.0, 1.0))
            .await
            .unwrap();

        let err = db
            .supply()
            .place(&request(mgr.user_id, wh.warehouse_id, store.store_id, i64::MAX))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let pepsi = db.products().get(store.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(pepsi.number_of_units, 5);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        let wh = db
            .warehouses()
            .insert("North", GeoPoint::new(1.0, 1.0))
            .await
            .unwrap();

        let err = db
            .supply()
            .place(&request(mgr.user_id, wh.warehouse_id, store.store_id, 20))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Product"));
    }
}
