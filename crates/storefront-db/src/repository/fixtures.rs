//! Shared setup for repository tests.

use chrono::NaiveDate;
use storefront_core::{GeoPoint, Money, NewUser, Product, Store, User, UserType};

use crate::pool::Database;

pub async fn user(db: &Database, name: &str, lat: f64, lon: f64, user_type: UserType) -> User {
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

pub async fn customer(db: &Database, name: &str, lat: f64, lon: f64) -> User {
    user(db, name, lat, lon, UserType::Customer).await
}

pub async fn manager(db: &Database, name: &str) -> User {
    user(db, name, 50.0, 50.0, UserType::Manager).await
}

pub async fn store(db: &Database, manager_id: i64, lat: f64, lon: f64) -> Store {
    db.stores()
        .insert(
            &format!("Store {lat}/{lon}"),
            GeoPoint::new(lat, lon),
            manager_id,
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
        )
        .await
        .unwrap()
}

pub async fn product(db: &Database, store_id: i64, name: &str, units: i64, cents: i64) -> Product {
    let product = Product {
        store_id,
        product_name: name.to_string(),
        number_of_units: units,
        price_per_unit: Money::from_cents(cents),
    };
    db.products().insert(&product).await.unwrap();
    product
}
