//! # Storefront Console Library
//!
//! The menu-driven storefront: connects to the database, then loops over
//! the login menu, the user menu and the admin menu until the user exits.
//!
//! ## Module Organization
//! ```text
//! storefront_cli/
//! ├── lib.rs          ◄─── You are here (logging, startup)
//! ├── app.rs          ◄─── Menu loop
//! ├── console.rs      ◄─── Prompts and input parsing
//! ├── render.rs       ◄─── Table / JSON report output
//! ├── error.rs        ◄─── Console error type and wording
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── CLI arguments and AppConfig
//! │   └── session.rs  ◄─── Logged-in user
//! └── commands/
//!     ├── account.rs  ◄─── Create user, log in, log out
//!     ├── shopping.rs ◄─── Stores, products, orders
//!     ├── manager.rs  ◄─── Updates, reports, supply requests
//!     └── admin.rs    ◄─── Admin menu
//! ```
//!
//! ## Output Streams
//! ```text
//! stdout ──► menus, prompts, reports
//! stderr ──► tracing logs (never interleaved with the menus)
//! ```

pub mod app;
pub mod commands;
pub mod console;
pub mod error;
pub mod render;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use console::Console;
use state::AppConfig;
use storefront_db::{Database, DbConfig};

const DEFAULT_FILTER: &str = "warn,storefront=info,sqlx=warn";
const VERBOSE_FILTER: &str = "debug,sqlx=warn";

/// Connects to the configured database and runs the menus on the terminal.
///
/// ## Startup Sequence
/// 1. Open the SQLite file (created if missing) and run pending migrations
/// 2. Run the menu loop on stdin/stdout
/// 3. Close the pool on exit
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!(path = %config.database_path.display(), "Starting storefront");

    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .with_context(|| format!("opening {}", config.database_path.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let console = Console::new(stdin.lock(), stdout.lock());

    App::new(db, config, console).run().await?;
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - Default: `warn,storefront=info,sqlx=warn`
/// - `--verbose`: debug for everything but sqlx
/// - `RUST_LOG` overrides both
pub fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
