//! # Order Repository
//!
//! Customer orders.
//!
//! ## Placing an Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place() - one transaction                            │
//! │                                                                         │
//! │  UPDATE products                                                       │
//! │     SET number_of_units = number_of_units - :units                     │
//! │   WHERE store_id = :store AND product_name = :name                     │
//! │     AND number_of_units >= :units          ← stock can't go negative   │
//! │       │                                                                 │
//! │       ├── 0 rows, product missing ──► DbError::NotFound   (rollback)   │
//! │       ├── 0 rows, stock too low   ──► DbError::Conflict   (rollback)   │
//! │       ▼                                                                 │
//! │  INSERT INTO orders (...)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The menu checks stock before calling `place`, so `Conflict` only surfaces
//! when another session sold the units in between.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::timestamp_now;
use crate::error::{DbError, DbResult};
use storefront_core::{NewOrder, Order, RecentOrder};

/// Repository for orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Records an order and takes the units out of stock.
    pub async fn place(&self, new_order: &NewOrder) -> DbResult<Order> {
        new_order.validate()?;
        let product_name = new_order.product_name.trim();

        debug!(
            customer_id = new_order.customer_id,
            store_id = new_order.store_id,
            product_name = %product_name,
            units = new_order.units,
            "Placing order"
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET number_of_units = number_of_units - ?3
            WHERE store_id = ?1 AND product_name = ?2 AND number_of_units >= ?3
            "#,
        )
        .bind(new_order.store_id)
        .bind(product_name)
        .bind(new_order.units)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let available: Option<i64> = sqlx::query_scalar(
                "SELECT number_of_units FROM products WHERE store_id = ?1 AND product_name = ?2",
            )
            .bind(new_order.store_id)
            .bind(product_name)
            .fetch_optional(&mut *tx)
            .await?;

            return Err(match available {
                None => DbError::not_found(
                    "Product",
                    format!("{}/{}", new_order.store_id, product_name),
                ),
                Some(available) => {
                    warn!(
                        store_id = new_order.store_id,
                        product_name = %product_name,
                        available,
                        requested = new_order.units,
                        "Stock changed before order could be placed"
                    );
                    DbError::Conflict(format!(
                        "only {available} units of {product_name} left"
                    ))
                }
            });
        }

        let order_time = timestamp_now();

        let result = sqlx::query(
            r#"
            INSERT INTO orders (customer_id, store_id, product_name, units_ordered, order_time)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(new_order.customer_id)
        .bind(new_order.store_id)
        .bind(product_name)
        .bind(new_order.units)
        .bind(order_time)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let order = Order {
            order_number: result.last_insert_rowid(),
            customer_id: new_order.customer_id,
            store_id: new_order.store_id,
            product_name: product_name.to_string(),
            units_ordered: new_order.units,
            order_time,
        };

        info!(
            order_number = order.order_number,
            customer_id = order.customer_id,
            store_id = order.store_id,
            "Order placed"
        );

        Ok(order)
    }

    /// A customer's most recent orders, newest first, each with the product's
    /// current price.
    pub async fn recent_for_customer(
        &self,
        customer_id: i64,
        limit: u32,
    ) -> DbResult<Vec<RecentOrder>> {
        debug!(customer_id, limit, "Fetching recent orders");

        let orders = sqlx::query_as::<_, RecentOrder>(
            r#"
            SELECT o.order_number, o.customer_id, o.store_id, o.product_name,
                   o.units_ordered, p.price_per_unit_cents, o.order_time
            FROM orders o
            JOIN products p
              ON p.store_id = o.store_id AND p.product_name = o.product_name
            WHERE o.customer_id = ?1
            ORDER BY o.order_time DESC, o.order_number DESC
            LIMIT ?2
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Counts all orders (diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::repository::fixtures;

    use super::*;

    fn order(customer_id: i64, store_id: i64, name: &str, units: i64) -> NewOrder {
        NewOrder {
            customer_id,
            store_id,
            product_name: name.to_string(),
            units,
        }
    }

    #[tokio::test]
    async fn test_place_decrements_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let amy = fixtures::customer(&db, "amy", 10.0, 10.0).await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 10, 199).await;

        let placed = db
            .orders()
            .place(&order(amy.user_id, store.store_id, "Pepsi", 3))
            .await
            .unwrap();
        assert_eq!(placed.units_ordered, 3);

        let pepsi = db.products().get(store.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(pepsi.number_of_units, 7);
    }

    #[tokio::test]
    async fn test_place_exact_stock_allowed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let amy = fixtures::customer(&db, "amy", 10.0, 10.0).await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 4, 199).await;

        db.orders()
            .place(&order(amy.user_id, store.store_id, "Pepsi", 4))
            .await
            .unwrap();

        let pepsi = db.products().get(store.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(pepsi.number_of_units, 0);
    }

    #[tokio::test]
    async fn test_insufficient_stock_rolls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let amy = fixtures::customer(&db, "amy", 10.0, 10.0).await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 2, 199).await;

        let err = db
            .orders()
            .place(&order(amy.user_id, store.store_id, "Pepsi", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));

        assert_eq!(db.orders().count().await.unwrap(), 0);
        let pepsi = db.products().get(store.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(pepsi.number_of_units, 2);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let amy = fixtures::customer(&db, "amy", 10.0, 10.0).await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;

        let err = db
            .orders()
            .place(&order(amy.user_id, store.store_id, "Ghost", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_zero_units_rejected_before_sql() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.orders().place(&order(1, 1, "Pepsi", 0)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_recent_for_customer_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let amy = fixtures::customer(&db, "amy", 10.0, 10.0).await;
        let bob = fixtures::customer(&db, "bob", 10.0, 10.0).await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 100, 199).await;

        let mut placed = Vec::new();
        for units in 1..=6 {
            let o = db
                .orders()
                .place(&order(amy.user_id, store.store_id, "Pepsi", units))
                .await
                .unwrap();
            placed.push(o.order_number);
        }
        db.orders()
            .place(&order(bob.user_id, store.store_id, "Pepsi", 1))
            .await
            .unwrap();

        let recent = db.orders().recent_for_customer(amy.user_id, 5).await.unwrap();
        let numbers: Vec<_> = recent.iter().map(|o| o.order_number).collect();

        placed.reverse();
        placed.truncate(5);
        assert_eq!(numbers, placed);
        assert!(recent.iter().all(|o| o.customer_id == amy.user_id));
        assert_eq!(recent[0].price_per_unit.cents(), 199);
        assert_eq!(recent[0].total().cents(), 6 * 199);
    }
}
