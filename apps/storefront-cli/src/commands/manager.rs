//! # Manager Commands
//!
//! User menu entries 5 to 9. A user counts as a manager of every store whose
//! `manager_id` is theirs; someone who manages nothing is turned away before
//! any prompt.

use std::io::{BufRead, Write};

use storefront_core::validation::validate_supply_units;
use storefront_core::{CoreError, NewSupplyRequest, ProductChange, Store, User};

use crate::app::App;
use crate::error::{AppError, AppResult};
use crate::render::{coordinate, timestamp};

const PRODUCT_NOT_IN_STORE: &str = "Product not found in the specified store.";

impl<R: BufRead, W: Write> App<R, W> {
    /// "5. Update Product": new units and price for a product in one of the
    /// user's stores. Each change is logged for the recent-updates report.
    pub(crate) async fn update_product(&mut self) -> AppResult<()> {
        let user = self.current_user().await?;
        let stores = self.managed_stores(&user).await?;

        let store_id = self.console.prompt_i64("Enter the storeID: ")?;
        let product_name = self.console.prompt("Enter the product name: ")?;
        let number_of_units = self.console.prompt_i64("Enter the new number of units: ")?;
        let price_per_unit = self.console.prompt_money("Enter the new price per unit: ")?;

        if !manages(&stores, store_id) {
            return Err(CoreError::NotStoreManager { store_id }.into());
        }

        if self.db.products().get(store_id, &product_name).await?.is_none() {
            return Err(AppError::rejected(PRODUCT_NOT_IN_STORE));
        }

        self.db
            .products()
            .update_details(
                user.user_id,
                store_id,
                &product_name,
                ProductChange {
                    number_of_units,
                    price_per_unit,
                },
            )
            .await?;

        self.console.say("Product information updated successfully!")
    }

    /// "6. View 5 recent Product Updates Info" across the user's stores.
    pub(crate) async fn view_recent_updates(&mut self) -> AppResult<()> {
        let user = self.current_user().await?;
        self.managed_stores(&user).await?;

        let updates = self
            .db
            .products()
            .recent_updates(user.user_id, self.config.report_limit)
            .await?;
        if updates.is_empty() {
            return self.console.say("No recent updates found for your stores.");
        }

        self.show_rows(
            &["Store ID", "Product Name", "New Units", "New Price", "Update Time"],
            &updates,
            |u| {
                vec![
                    u.store_id.to_string(),
                    u.product_name.clone(),
                    u.new_units.to_string(),
                    u.new_price.to_string(),
                    timestamp(&u.updated_on),
                ]
            },
        )
    }

    /// "7. View 5 Popular Items": most ordered products in the user's stores.
    pub(crate) async fn view_popular_products(&mut self) -> AppResult<()> {
        let user = self.current_user().await?;
        self.managed_stores(&user).await?;

        let limit = self.config.report_limit;
        let rows = self.db.reports().popular_products(user.user_id, limit).await?;
        if rows.is_empty() {
            return self.console.say("No orders found for your stores.");
        }

        self.console
            .say(format!("Top {limit} Popular Products in Your Stores:"))?;
        self.show_rows(&["Product Name", "Order Count"], &rows, |r| {
            vec![r.product_name.clone(), r.order_count.to_string()]
        })
    }

    /// "8. View 5 Popular Customers" of the user's stores.
    pub(crate) async fn view_popular_customers(&mut self) -> AppResult<()> {
        let user = self.current_user().await?;
        self.managed_stores(&user).await?;

        let limit = self.config.report_limit;
        let rows = self.db.reports().popular_customers(user.user_id, limit).await?;
        if rows.is_empty() {
            return self.console.say("No orders found for your stores.");
        }

        self.console.say(format!(
            "Top {limit} Customers Who Placed the Most Orders in Your Stores:"
        ))?;
        self.show_rows(
            &["Name", "Latitude", "Longitude", "Type", "Order Count"],
            &rows,
            |r| {
                vec![
                    r.name.clone(),
                    coordinate(r.latitude),
                    coordinate(r.longitude),
                    r.user_type.to_string(),
                    r.order_count.to_string(),
                ]
            },
        )
    }

    /// "9. Place Product Supply Request to Warehouse". The store is restocked
    /// as soon as the request is recorded.
    pub(crate) async fn place_supply_request(&mut self) -> AppResult<()> {
        let user = self.current_user().await?;
        let stores = self.managed_stores(&user).await?;

        let store_id = self.console.prompt_i64("Enter the storeID: ")?;
        let product_name = self.console.prompt("Enter the product name: ")?;
        let units = self.console.prompt_i64("Enter the number of units needed: ")?;
        let warehouse_id = self.console.prompt_i64("Enter the warehouseID: ")?;
        validate_supply_units(units)?;

        if !manages(&stores, store_id) {
            return Err(AppError::rejected(
                "You do not have permission to place supply requests for this store.",
            ));
        }

        if self.db.products().get(store_id, &product_name).await?.is_none() {
            return Err(AppError::rejected(PRODUCT_NOT_IN_STORE));
        }

        if self.db.warehouses().get_by_id(warehouse_id).await?.is_none() {
            return Err(CoreError::WarehouseNotFound(warehouse_id).into());
        }

        self.db
            .supply()
            .place(&NewSupplyRequest {
                manager_id: user.user_id,
                warehouse_id,
                store_id,
                product_name,
                units,
            })
            .await?;

        self.console.say("Product supply request placed successfully!")
    }

    /// Stores managed by `user`, or `NoManagedStores`.
    async fn managed_stores(&self, user: &User) -> AppResult<Vec<Store>> {
        let stores = self.db.stores().managed_by(user.user_id).await?;
        if stores.is_empty() {
            return Err(CoreError::NoManagedStores.into());
        }
        Ok(stores)
    }
}

fn manages(stores: &[Store], store_id: i64) -> bool {
    stores.iter().any(|s| s.store_id == store_id)
}
