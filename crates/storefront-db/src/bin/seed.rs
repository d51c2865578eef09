//! # Seed Data Generator
//!
//! Populates the database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # 10 stores, 20 customers (default)
//! cargo run -p storefront-db --bin seed -- --db ./storefront.db
//!
//! # Custom amounts
//! cargo run -p storefront-db --bin seed -- --db ./storefront.db --stores 25 --customers 100
//! ```
//!
//! ## Generated Data
//! - One admin account: `admin` / `admin`
//! - One manager per two stores: `manager1`, `manager2`, ... (password `password`)
//! - Customers: `customer1`, `customer2`, ... (password `password`)
//! - Every store carries the same product catalogue with varied stock/prices
//! - A handful of warehouses
//!
//! Positions and quantities come from a fixed formula, so two runs with the
//! same arguments produce the same database.

use chrono::NaiveDate;
use clap::Parser;
use storefront_core::{GeoPoint, Money, NewUser, Product, UserType};
use storefront_db::{Database, DbConfig};

/// Products every seeded store carries.
const CATALOGUE: &[&str] = &[
    "7up", "Brisk", "Donuts", "Egg", "Hot and Spicy Chips", "Ice Cream", "Lemonade", "Orange Juice",
    "Pepsi", "Pudding",
];

/// Warehouse areas.
const WAREHOUSE_AREAS: &[&str] = &["North Yard", "East Dock", "Central Depot", "South Annex"];

const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Storefront seed data generator")]
struct Args {
    /// Database file path
    #[arg(short, long, env = "STOREFRONT_DB_PATH", default_value = "./storefront.db")]
    db: String,

    /// Number of stores to generate
    #[arg(short, long, default_value_t = 10)]
    stores: u32,

    /// Number of customer accounts to generate
    #[arg(short, long, default_value_t = 20)]
    customers: u32,
}

/// Spreads `index` over the 0..100 grid.
fn grid_point(index: u32, stride: u32) -> GeoPoint {
    let lat = ((index * stride) % 97) as f64 + 1.5;
    let lon = ((index * stride * 7 + 13) % 97) as f64 + 0.5;
    GeoPoint::new(lat, lon)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Storefront Seed Data Generator");
    println!("==============================");
    println!("Database:  {}", args.db);
    println!("Stores:    {}", args.stores);
    println!("Customers: {}", args.customers);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.users().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    db.users()
        .create_with_type(
            &NewUser {
                name: "admin".to_string(),
                password: "admin".to_string(),
                location: GeoPoint::new(50.0, 50.0),
            },
            UserType::Admin,
        )
        .await?;
    println!("✓ Admin account created (admin / admin)");

    let manager_count = args.stores.div_ceil(2);
    let mut manager_ids = Vec::with_capacity(manager_count as usize);
    for i in 1..=manager_count {
        let manager = db
            .users()
            .create_with_type(
                &NewUser {
                    name: format!("manager{i}"),
                    password: DEMO_PASSWORD.to_string(),
                    location: grid_point(i, 23),
                },
                UserType::Manager,
            )
            .await?;
        manager_ids.push(manager.user_id);
    }
    println!("✓ Generated {} managers", manager_ids.len());

    let established = NaiveDate::from_ymd_opt(2015, 6, 1).ok_or("invalid base date")?;
    let mut product_total = 0;

    for i in 0..args.stores {
        let manager_id = manager_ids[(i / 2) as usize];
        let date = established + chrono::Duration::days(i64::from(i) * 97);

        let store = db
            .stores()
            .insert(&format!("Store {}", i + 1), grid_point(i + 1, 11), manager_id, date)
            .await?;

        for (j, name) in CATALOGUE.iter().enumerate() {
            let seed = (i as usize) * CATALOGUE.len() + j;
            let product = Product {
                store_id: store.store_id,
                product_name: (*name).to_string(),
                number_of_units: ((seed * 37) % 120) as i64,
                price_per_unit: Money::from_cents(99 + ((seed * 53) % 900) as i64),
            };

            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {} in store {}: {}", name, store.store_id, e);
                continue;
            }
            product_total += 1;
        }
    }
    println!(
        "✓ Generated {} stores with {} products",
        args.stores, product_total
    );

    for i in 1..=args.customers {
        db.users()
            .create(&NewUser {
                name: format!("customer{i}"),
                password: DEMO_PASSWORD.to_string(),
                location: grid_point(i, 29),
            })
            .await?;

        if i % 50 == 0 {
            println!("  Generated {} customers...", i);
        }
    }
    println!("✓ Generated {} customers", args.customers);

    for (i, area) in WAREHOUSE_AREAS.iter().enumerate() {
        db.warehouses().insert(area, grid_point(i as u32 + 1, 41)).await?;
    }
    println!("✓ Generated {} warehouses", WAREHOUSE_AREAS.len());

    println!();
    println!("✓ Seed complete in {:?}!", start.elapsed());

    db.close().await;
    Ok(())
}
