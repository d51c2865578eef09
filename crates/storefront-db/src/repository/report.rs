//! # Report Repository
//!
//! Manager reports over the orders placed in the stores a manager runs.
//!
//! ```text
//! stores (manager_id = ?) ──┐
//!                           ├── JOIN ── GROUP BY product_name ── popular_products
//! orders ───────────────────┤
//!                           └── JOIN users ── GROUP BY user_id ── popular_customers
//! ```
//!
//! Counts are numbers of orders, not units. Ties break by name so the top
//! five is stable.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use storefront_core::{PopularCustomer, PopularProduct};

/// Repository for manager reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Most ordered product names across the manager's stores.
    pub async fn popular_products(&self, manager_id: i64, limit: u32) -> DbResult<Vec<PopularProduct>> {
        debug!(manager_id, limit, "Building popular products report");

        let rows = sqlx::query_as::<_, PopularProduct>(
            r#"
            SELECT o.product_name, COUNT(o.order_number) AS order_count
            FROM orders o
            JOIN stores s ON s.store_id = o.store_id
            WHERE s.manager_id = ?1
            GROUP BY o.product_name
            ORDER BY order_count DESC, o.product_name ASC
            LIMIT ?2
            "#,
        )
        .bind(manager_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Customers with the most orders across the manager's stores.
    pub async fn popular_customers(
        &self,
        manager_id: i64,
        limit: u32,
    ) -> DbResult<Vec<PopularCustomer>> {
        debug!(manager_id, limit, "Building popular customers report");

        let rows = sqlx::query_as::<_, PopularCustomer>(
            r#"
            SELECT u.user_id, u.name, u.latitude, u.longitude, u.user_type,
                   COUNT(o.order_number) AS order_count
            FROM orders o
            JOIN stores s ON s.store_id = o.store_id
            JOIN users u ON u.user_id = o.customer_id
            WHERE s.manager_id = ?1
            GROUP BY u.user_id
            ORDER BY order_count DESC, u.name ASC
            LIMIT ?2
            "#,
        )
        .bind(manager_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::repository::fixtures;
    use storefront_core::NewOrder;

    use super::*;

    async fn buy(db: &Database, customer_id: i64, store_id: i64, name: &str) {
        db.orders()
            .place(&NewOrder {
                customer_id,
                store_id,
                product_name: name.to_string(),
                units: 1,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_popular_reports() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let alice = fixtures::manager(&db, "alice").await;
        let bob = fixtures::manager(&db, "bob").await;
        let a1 = fixtures::store(&db, alice.user_id, 10.0, 10.0).await;
        let a2 = fixtures::store(&db, alice.user_id, 12.0, 12.0).await;
        let b1 = fixtures::store(&db, bob.user_id, 80.0, 80.0).await;

        for store in [&a1, &a2, &b1] {
            fixtures::product(&db, store.store_id, "Pepsi", 100, 199).await;
            fixtures::product(&db, store.store_id, "Chips", 100, 99).await;
        }

        let amy = fixtures::customer(&db, "amy", 10.0, 10.0).await;
        let carl = fixtures::customer(&db, "carl", 10.0, 10.0).await;

        // Pepsi: 3 orders across both of alice's stores, Chips: 1
        buy(&db, amy.user_id, a1.store_id, "Pepsi").await;
        buy(&db, amy.user_id, a2.store_id, "Pepsi").await;
        buy(&db, carl.user_id, a1.store_id, "Pepsi").await;
        buy(&db, amy.user_id, a1.store_id, "Chips").await;
        // Bob's store does not count for alice
        buy(&db, carl.user_id, b1.store_id, "Chips").await;
        buy(&db, carl.user_id, b1.store_id, "Chips").await;
        buy(&db, carl.user_id, b1.store_id, "Chips").await;

        let products = db.reports().popular_products(alice.user_id, 5).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_name, "Pepsi");
        assert_eq!(products[0].order_count, 3);
        assert_eq!(products[1].order_count, 1);

        let customers = db.reports().popular_customers(alice.user_id, 5).await.unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].name, "amy");
        assert_eq!(customers[0].order_count, 3);
        assert_eq!(customers[1].name, "carl");
        assert_eq!(customers[1].order_count, 1);

        let top_one = db.reports().popular_customers(alice.user_id, 1).await.unwrap();
        assert_eq!(top_one.len(), 1);
    }

    #[tokio::test]
    async fn test_reports_empty_without_orders() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let alice = fixtures::manager(&db, "alice").await;
        fixtures::store(&db, alice.user_id, 10.0, 10.0).await;

        assert!(db.reports().popular_products(alice.user_id, 5).await.unwrap().is_empty());
        assert!(db.reports().popular_customers(alice.user_id, 5).await.unwrap().is_empty());
    }
}
