//! # Product Repository
//!
//! Database operations for per-store inventory.
//!
//! ## Key Operations
//! - Product list for one store
//! - Manager updates, recorded in `product_updates`
//! - Admin overwrite (no update record)
//! - "5 recent Product Updates" report
//!
//! ## Update History
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              update_details (one transaction)                           │
//! │                                                                         │
//! │  UPDATE products SET number_of_units = ?, price_per_unit_cents = ?     │
//! │       │                                                                 │
//! │       ├── 0 rows ──► rollback, DbError::NotFound                        │
//! │       ▼                                                                 │
//! │  INSERT INTO product_updates (manager_id, store_id, product_name, ...) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  product_updates stores *who* and *when*. The report joins back to     │
//! │  products for the current units/price.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::timestamp_now;
use crate::error::{DbError, DbResult};
use storefront_core::{Product, ProductChange, RecentUpdate};

const PRODUCT_COLUMNS: &str = "store_id, product_name, number_of_units, price_per_unit_cents";

fn product_key(store_id: i64, product_name: &str) -> String {
    format!("{store_id}/{product_name}")
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let products = repo.list_by_store(3).await?;
/// let pepsi = repo.get(3, "Pepsi").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Products carried by one store, ordered by name.
    pub async fn list_by_store(&self, store_id: i64) -> DbResult<Vec<Product>> {
        debug!(store_id, "Listing store products");

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE store_id = ?1 ORDER BY product_name"
        ))
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Store product list returned");
        Ok(products)
    }

    /// Gets one product.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - The store does not carry that product
    pub async fn get(&self, store_id: i64, product_name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE store_id = ?1 AND product_name = ?2"
        ))
        .bind(store_id)
        .bind(product_name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Every product in every store (admin view).
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        debug!("Listing all products");

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY store_id, product_name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - The store already carries that name
    /// * `Err(DbError::ForeignKeyViolation)` - The store does not exist
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(
            store_id = product.store_id,
            product_name = %product.product_name,
            "Inserting product"
        );

        ProductChange {
            number_of_units: product.number_of_units,
            price_per_unit: product.price_per_unit,
        }
        .validate()?;

        sqlx::query(&format!(
            "INSERT INTO products ({PRODUCT_COLUMNS}) VALUES (?1, ?2, ?3, ?4)"
        ))
        .bind(product.store_id)
        .bind(&product.product_name)
        .bind(product.number_of_units)
        .bind(product.price_per_unit.cents())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate(
                "product",
                product_key(product.store_id, &product.product_name),
            ),
            other => other,
        })?;

        Ok(())
    }

    /// Manager update: sets units and price and records who changed it.
    ///
    /// Callers check that `manager_id` manages `store_id` first.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product after the change
    /// * `Err(DbError::NotFound)` - The store does not carry that product
    pub async fn update_details(
        &self,
        manager_id: i64,
        store_id: i64,
        product_name: &str,
        change: ProductChange,
    ) -> DbResult<Product> {
        change.validate()?;
        let product_name = product_name.trim();

        debug!(manager_id, store_id, product_name = %product_name, "Updating product");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                number_of_units = ?3,
                price_per_unit_cents = ?4
            WHERE store_id = ?1 AND product_name = ?2
            "#,
        )
        .bind(store_id)
        .bind(product_name)
        .bind(change.number_of_units)
        .bind(change.price_per_unit.cents())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(DbError::not_found("Product", product_key(store_id, product_name)));
        }

        sqlx::query(
            r#"
            INSERT INTO product_updates (manager_id, store_id, product_name, updated_on)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(manager_id)
        .bind(store_id)
        .bind(product_name)
        .bind(timestamp_now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            manager_id,
            store_id,
            product_name = %product_name,
            units = change.number_of_units,
            price = %change.price_per_unit,
            "Product updated"
        );

        Ok(Product {
            store_id,
            product_name: product_name.to_string(),
            number_of_units: change.number_of_units,
            price_per_unit: change.price_per_unit,
        })
    }

    /// Admin overwrite of units and price. Leaves no update record.
    pub async fn set_details(
        &self,
        store_id: i64,
        product_name: &str,
        change: ProductChange,
    ) -> DbResult<Product> {
        change.validate()?;
        let product_name = product_name.trim();

        debug!(store_id, product_name = %product_name, "Setting product details");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                number_of_units = ?3,
                price_per_unit_cents = ?4
            WHERE store_id = ?1 AND product_name = ?2
            "#,
        )
        .bind(store_id)
        .bind(product_name)
        .bind(change.number_of_units)
        .bind(change.price_per_unit.cents())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product_key(store_id, product_name)));
        }

        info!(store_id, product_name = %product_name, "Product details set by admin");

        Ok(Product {
            store_id,
            product_name: product_name.to_string(),
            number_of_units: change.number_of_units,
            price_per_unit: change.price_per_unit,
        })
    }

    /// The manager's own updates on stores they manage, newest first, with
    /// each product's current units and price.
    pub async fn recent_updates(&self, manager_id: i64, limit: u32) -> DbResult<Vec<RecentUpdate>> {
        debug!(manager_id, limit, "Fetching recent product updates");

        let updates = sqlx::query_as::<_, RecentUpdate>(
            r#"
            SELECT
                u.store_id,
                u.product_name,
                p.number_of_units AS new_units,
                p.price_per_unit_cents AS new_price_cents,
                u.updated_on
            FROM product_updates u
            JOIN stores s ON s.store_id = u.store_id
            JOIN products p ON p.store_id = u.store_id AND p.product_name = u.product_name
            WHERE s.manager_id = ?1 AND u.manager_id = ?1
            ORDER BY u.updated_on DESC, u.update_number DESC
            LIMIT ?2
            "#,
        )
        .bind(manager_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(updates)
    }

    /// Counts products across all stores (diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
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
    use storefront_core::Money;

    use super::*;

    fn change(units: i64, cents: i64) -> ProductChange {
        ProductChange {
            number_of_units: units,
            price_per_unit: Money::from_cents(cents),
        }
    }

    #[tokio::test]
    async fn test_list_by_store_sorted_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        let other = fixtures::store(&db, mgr.user_id, 20.0, 20.0).await;

        fixtures::product(&db, store.store_id, "Pepsi", 10, 199).await;
        fixtures::product(&db, store.store_id, "Apple", 5, 50).await;
        fixtures::product(&db, other.store_id, "Banana", 5, 25).await;

        let products = db.products().list_by_store(store.store_id).await.unwrap();
        let names: Vec<_> = products.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Pepsi"]);
        assert_eq!(products[1].price_per_unit, Money::from_cents(199));

        assert_eq!(db.products().list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_same_name_in_two_stores() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let a = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        let b = fixtures::store(&db, mgr.user_id, 20.0, 20.0).await;

        fixtures::product(&db, a.store_id, "Pepsi", 10, 199).await;
        fixtures::product(&db, b.store_id, "Pepsi", 3, 250).await;

        let in_b = db.products().get(b.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(in_b.number_of_units, 3);

        let dup = Product {
            store_id: a.store_id,
            product_name: "Pepsi".to_string(),
            number_of_units: 1,
            price_per_unit: Money::from_cents(1),
        };
        let err = db.products().insert(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_details_records_history() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 10, 199).await;

        let updated = db
            .products()
            .update_details(mgr.user_id, store.store_id, "Pepsi", change(40, 249))
            .await
            .unwrap();
        assert_eq!(updated.number_of_units, 40);

        let stored = db.products().get(store.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(stored.number_of_units, 40);
        assert_eq!(stored.price_per_unit, Money::from_cents(249));

        let recent = db.products().recent_updates(mgr.user_id, 5).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].product_name, "Pepsi");
        assert_eq!(recent[0].new_units, 40);
        assert_eq!(recent[0].new_price, Money::from_cents(249));
    }

    #[tokio::test]
    async fn test_update_missing_product_rolls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;

        let err = db
            .products()
            .update_details(mgr.user_id, store.store_id, "Ghost", change(1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert!(db.products().recent_updates(mgr.user_id, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_negative_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 10, 199).await;

        let err = db
            .products()
            .update_details(mgr.user_id, store.store_id, "Pepsi", change(-5, 199))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_set_details_leaves_no_history() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mgr = fixtures::manager(&db, "mgr").await;
        let store = fixtures::store(&db, mgr.user_id, 10.0, 10.0).await;
        fixtures::product(&db, store.store_id, "Pepsi", 10, 199).await;

        db.products()
            .set_details(store.store_id, "Pepsi", change(0, 100))
            .await
            .unwrap();

        let stored = db.products().get(store.store_id, "Pepsi").await.unwrap().unwrap();
        assert_eq!(stored.number_of_units, 0);
        assert!(db.products().recent_updates(mgr.user_id, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_updates_limited_and_scoped() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let alice = fixtures::manager(&db, "alice").await;
        let bob = fixtures::manager(&db, "bob").await;
        let mine = fixtures::store(&db, alice.user_id, 10.0, 10.0).await;
        let theirs = fixtures::store(&db, bob.user_id, 20.0, 20.0).await;
        fixtures::product(&db, mine.store_id, "Pepsi", 10, 199).await;
        fixtures::product(&db, theirs.store_id, "Pepsi", 10, 199).await;

        for units in 1..=7 {
            db.products()
                .update_details(alice.user_id, mine.store_id, "Pepsi", change(units, 199))
                .await
                .unwrap();
        }
        db.products()
            .update_details(bob.user_id, theirs.store_id, "Pepsi", change(99, 199))
            .await
            .unwrap();

        let recent = db.products().recent_updates(alice.user_id, 5).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert!(recent.iter().all(|u| u.store_id == mine.store_id));
    }
}
