//! # Configuration
//!
//! Command-line arguments and the configuration built from them.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--radius`, ...)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after startup, so no lock is needed.

use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;

use storefront_core::geo::NEARBY_RADIUS_MILES;
use storefront_core::DEFAULT_REPORT_LIMIT;

use crate::error::{AppError, AppResult};
use crate::render::OutputFormat;

const DB_FILE_NAME: &str = "storefront.db";

/// Storefront console
#[derive(Parser, Debug)]
#[command(
    name = "storefront",
    version,
    about = "Console storefront: browse nearby stores, order, manage inventory"
)]
pub struct CliArgs {
    /// SQLite database file
    #[arg(short = 'd', long = "db", env = "STOREFRONT_DB_PATH", value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Radius in miles for "nearby" stores and order placement
    #[arg(short = 'r', long, env = "STOREFRONT_RADIUS", default_value_t = NEARBY_RADIUS_MILES)]
    pub radius: f64,

    /// Rows shown by the recent/popular reports
    #[arg(long, default_value_t = DEFAULT_REPORT_LIMIT)]
    pub recent_limit: u32,

    /// Output format for reports
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Nearby radius in miles.
    /// Default: 30
    pub radius: f64,

    /// Rows in "View 5 recent orders" and the other reports.
    /// Default: 5
    pub report_limit: u32,

    pub format: OutputFormat,

    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: PathBuf::from(DB_FILE_NAME),
            radius: NEARBY_RADIUS_MILES,
            report_limit: DEFAULT_REPORT_LIMIT,
            format: OutputFormat::Table,
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from parsed arguments.
    ///
    /// Without `--db` the file lives in the platform data directory:
    /// - **Linux**: `~/.local/share/storefront/storefront.db`
    /// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
    /// - **Windows**: `%APPDATA%\storefront\storefront\data\storefront.db`
    pub fn from_args(args: CliArgs) -> AppResult<Self> {
        if !(args.radius.is_finite() && args.radius > 0.0) {
            return Err(AppError::invalid_input(format!(
                "radius must be a positive number of miles, got {}",
                args.radius
            )));
        }
        if args.recent_limit == 0 {
            return Err(AppError::invalid_input("recent-limit must be at least 1"));
        }

        let database_path = match args.db {
            Some(path) => path,
            None => default_database_path()?,
        };

        Ok(AppConfig {
            database_path,
            radius: args.radius,
            report_limit: args.recent_limit,
            format: args.format,
            verbose: args.verbose,
        })
    }
}

/// Platform data directory path, created if missing.
fn default_database_path() -> AppResult<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "storefront", "storefront").ok_or_else(|| {
        AppError::invalid_input("Could not determine app data directory; pass --db")
    })?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join(DB_FILE_NAME))
}
