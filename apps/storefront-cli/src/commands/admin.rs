//! # Admin Commands
//!
//! "10. Admin System." opens a sub-menu for users whose type is `admin`.
//! A failed action is printed and the admin menu is shown again; only
//! "5. Quit" returns to the user menu.

use std::io::{BufRead, Write};

use storefront_core::{CoreError, GeoPoint, ProductChange, UserType, UserUpdate};
use tracing::{debug, info};

use crate::app::App;
use crate::error::AppResult;
use crate::render::coordinate;

const ADMIN_PROMPT: &str = "Enter your choice: ";

impl<R: BufRead, W: Write> App<R, W> {
    pub(crate) async fn admin_menu(&mut self) -> AppResult<()> {
        let admin = self.current_user().await?;
        if !admin.is_admin() {
            return Err(CoreError::AdminRequired.into());
        }

        loop {
            self.console.say("Admin Menu:")?;
            self.console.say("1. View all users")?;
            self.console.say("2. Update user information")?;
            self.console.say("3. View all products")?;
            self.console.say("4. Update product information")?;
            self.console.say("5. Quit")?;

            let choice = self.console.read_choice_with(ADMIN_PROMPT)?;
            debug!(choice, "Admin menu choice");

            let result = match choice {
                1 => self.view_all_users().await,
                2 => self.update_user().await,
                3 => self.view_all_products().await,
                4 => self.update_product_info().await,
                5 => return Ok(()),
                _ => self.console.say("Invalid choice. Please try again."),
            };
            self.report(result)?;
            self.console.say("")?;
        }
    }

    /// Password hashes are never shown.
    async fn view_all_users(&mut self) -> AppResult<()> {
        let users = self.db.users().list_all().await?;

        self.console.say("User Information:")?;
        self.show_rows(
            &["UserID", "Name", "Latitude", "Longitude", "Type"],
            &users,
            |u| {
                vec![
                    u.user_id.to_string(),
                    u.name.clone(),
                    coordinate(u.latitude),
                    coordinate(u.longitude),
                    u.user_type.to_string(),
                ]
            },
        )
    }

    async fn update_user(&mut self) -> AppResult<()> {
        let user_id = self.console.prompt_i64("Enter the userID to update: ")?;
        let name = self.console.prompt("Enter the new name: ")?;
        let password = self.console.prompt("Enter the new password: ")?;
        let latitude = self.console.prompt_f64("Enter the new latitude: ")?;
        let longitude = self.console.prompt_f64("Enter the new longitude: ")?;
        let user_type: UserType = self.console.prompt("Enter the new user type: ")?.parse()?;

        let update = UserUpdate {
            name: name.trim().to_string(),
            password,
            location: GeoPoint::checked(latitude, longitude)?,
            user_type,
        };
        let user = self.db.users().update(user_id, &update).await?;

        info!(user_id = user.user_id, user_type = %user.user_type, "User updated by admin");
        self.console.say("User information updated successfully!")
    }

    async fn view_all_products(&mut self) -> AppResult<()> {
        let products = self.db.products().list_all().await?;

        self.console.say("Product Information:")?;
        self.show_rows(
            &["StoreID", "ProductName", "NumberOfUnits", "PricePerUnit"],
            &products,
            |p| {
                vec![
                    p.store_id.to_string(),
                    p.product_name.clone(),
                    p.number_of_units.to_string(),
                    p.price_per_unit.to_string(),
                ]
            },
        )
    }

    /// Overwrites units and price in any store. Not recorded as a manager
    /// update.
    async fn update_product_info(&mut self) -> AppResult<()> {
        let store_id = self.console.prompt_i64("Enter the storeID: ")?;
        let product_name = self.console.prompt("Enter the product name: ")?;
        let number_of_units = self.console.prompt_i64("Enter the new number of units: ")?;
        let price_per_unit = self.console.prompt_money("Enter the new price per unit: ")?;

        let product = self
            .db
            .products()
            .set_details(
                store_id,
                &product_name,
                ProductChange {
                    number_of_units,
                    price_per_unit,
                },
            )
            .await?;

        info!(
            store_id = product.store_id,
            product_name = %product.product_name,
            "Product updated by admin"
        );
        self.console.say("Product information updated successfully!")
    }
}
