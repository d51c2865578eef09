//! # Shopping Commands
//!
//! User menu entries 1 to 4: nearby stores, a store's products, placing an
//! order and the customer's recent orders.
//!
//! ## Order Checks
//! ```text
//! Enter the storeID / product name / number of units
//!       │
//!       ├── store missing          → "Invalid storeID."
//!       ├── units not in 1..=999   → "Error: number of units must be ..."
//!       ├── store beyond radius    → "Store is not within a 30-mile radius."
//!       ├── product missing        → "Product not found in the store."
//!       ├── not enough units       → "Insufficient stock."
//!       └── OK → OrderRepository::place (stock decrement + insert, one tx)
//! ```

use std::io::{BufRead, Write};

use storefront_core::validation::validate_order_units;
use storefront_core::{CoreError, Money, NewOrder, Store};
use tracing::{info, warn};

use crate::app::App;
use crate::error::AppResult;
use crate::render::{coordinate, timestamp};

impl<R: BufRead, W: Write> App<R, W> {
    /// "1. View Stores within 30 miles" of the user's saved location.
    pub(crate) async fn view_stores(&mut self) -> AppResult<()> {
        let user = self.current_user().await?;
        let radius = self.config.radius;

        let stores = self.db.stores().nearby(user.location(), radius).await?;
        if stores.is_empty() {
            return self
                .console
                .say(format!("No stores found within a {radius}-mile radius."));
        }

        self.console
            .say(format!("Stores within a {radius}-mile radius:"))?;
        self.show_rows(
            &["Store ID", "Name", "Latitude", "Longitude", "Distance"],
            &stores,
            |s| {
                vec![
                    s.store.store_id.to_string(),
                    s.store.name.clone(),
                    coordinate(s.store.latitude),
                    coordinate(s.store.longitude),
                    coordinate(s.distance),
                ]
            },
        )
    }

    /// "2. View Product List" of one store.
    pub(crate) async fn view_products(&mut self) -> AppResult<()> {
        let store_id = self.console.prompt_i64("Enter the storeID: ")?;
        let store = self.find_store(store_id).await?;

        let products = self.db.products().list_by_store(store.store_id).await?;

        self.console
            .say(format!("Products for Store {}:", store.store_id))?;
        self.show_rows(
            &["Product Name", "Number of Units", "Price per Unit"],
            &products,
            |p| {
                vec![
                    p.product_name.clone(),
                    p.number_of_units.to_string(),
                    p.price_per_unit.to_string(),
                ]
            },
        )
    }

    /// "3. Place a Order" as the logged-in customer.
    pub(crate) async fn place_order(&mut self) -> AppResult<()> {
        let user = self.current_user().await?;

        let store_id = self.console.prompt_i64("Enter the storeID: ")?;
        let product_name = self.console.prompt("Enter the product name: ")?;
        let units = self.console.prompt_i64("Enter the number of units: ")?;

        let store = self.find_store(store_id).await?;
        validate_order_units(units)?;
        store.ensure_within(user.location(), self.config.radius)?;

        let product = self
            .db
            .products()
            .get(store.store_id, &product_name)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound {
                store_id: store.store_id,
                product: product_name.trim().to_string(),
            })?;
        product.ensure_stock(units)?;

        let order = self
            .db
            .orders()
            .place(&NewOrder {
                customer_id: user.user_id,
                store_id: store.store_id,
                product_name: product.product_name.clone(),
                units,
            })
            .await?;

        match product.price_per_unit.checked_mul(units) {
            Some(total) => info!(
                order_number = order.order_number,
                total = %total,
                "Order placed from console"
            ),
            None => warn!(
                order_number = order.order_number,
                "Order placed from console; total does not fit in cents"
            ),
        }
        self.console.say("Order placed successfully!")
    }

    /// "4. View 5 recent orders" of the logged-in user.
    pub(crate) async fn view_recent_orders(&mut self) -> AppResult<()> {
        let user = self.current_user().await?;

        let orders = self
            .db
            .orders()
            .recent_for_customer(user.user_id, self.config.report_limit)
            .await?;
        if orders.is_empty() {
            return self.console.say("You have no recent orders.");
        }

        self.console.say("Your Recent Orders:")?;
        self.show_rows(
            &[
                "Order Number",
                "Store ID",
                "Product Name",
                "Units Ordered",
                "Total",
                "Order Time",
            ],
            &orders,
            |o| {
                vec![
                    o.order_number.to_string(),
                    o.store_id.to_string(),
                    o.product_name.clone(),
                    o.units_ordered.to_string(),
                    o.total().to_string(),
                    timestamp(&o.order_time),
                ]
            },
        )?;

        let spent: Money = orders.iter().map(|o| o.total()).sum();
        self.console
            .say(format!("Total at current prices: {spent}"))
    }

    pub(crate) async fn find_store(&self, store_id: i64) -> AppResult<Store> {
        let store = self
            .db
            .stores()
            .get_by_id(store_id)
            .await?
            .ok_or(CoreError::StoreNotFound(store_id))?;
        Ok(store)
    }
}
