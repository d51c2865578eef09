//! Helpers for driving the menus in tests: an in-memory database, an `App`
//! reading a scripted input, and rows to shop in.

use std::io::Cursor;

use chrono::NaiveDate;
use storefront_core::{
    GeoPoint, Money, NewOrder, NewUser, Product, Store, User, UserType, Warehouse,
};
use storefront_db::{Database, DbConfig};

use crate::app::App;
use crate::console::Console;
use crate::state::AppConfig;

pub type TestApp = App<Cursor<Vec<u8>>, Vec<u8>>;

pub async fn database() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// An app sharing `db` whose console reads `input` line by line.
pub fn app(db: &Database, input: &str) -> TestApp {
    let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    App::new(db.clone(), AppConfig::default(), console)
}

/// Everything the app printed so far.
pub fn output(app: TestApp) -> String {
    String::from_utf8(app.console.into_output()).unwrap()
}

pub fn console_text(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(console.into_output()).unwrap()
}

/// Logs `user` in the way the login menu does.
pub async fn log_in(app: &mut TestApp, user: User) {
    let session = app.db.sessions().start(user.user_id).await.unwrap();
    app.session.begin(session.session_id, user);
}

/// Password is always "pw".
pub async fn add_user(db: &Database, name: &str, lat: f64, lon: f64, user_type: UserType) -> User {
    db.users()
        .create_with_type(
            &NewUser {
                name: name.to_string(),
                password: "pw".to_string(),
                location: GeoPoint::new(lat, lon),
            },
            user_type,
        )
        .await
        .unwrap()
}

pub async fn add_store(db: &Database, manager_id: i64, lat: f64, lon: f64) -> Store {
    db.stores()
        .insert(
            &format!("Store {lat}/{lon}"),
            GeoPoint::new(lat, lon),
            manager_id,
            NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
        )
        .await
        .unwrap()
}

pub async fn add_product(db: &Database, store_id: i64, name: &str, units: i64, cents: i64) {
    db.products()
        .insert(&Product {
            store_id,
            product_name: name.to_string(),
            number_of_units: units,
            price_per_unit: Money::from_cents(cents),
        })
        .await
        .unwrap();
}

pub async fn add_order(db: &Database, customer_id: i64, store_id: i64, product: &str, units: i64) {
    db.orders()
        .place(&NewOrder {
            customer_id,
            store_id,
            product_name: product.to_string(),
            units,
        })
        .await
        .unwrap();
}

pub async fn add_warehouse(db: &Database) -> Warehouse {
    db.warehouses()
        .insert("Riverside", GeoPoint::new(20.0, 20.0))
        .await
        .unwrap()
}
