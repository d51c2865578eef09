//! # Storefront Entry Point
//!
//! ```text
//! storefront [--db FILE] [--radius MILES] [--recent-limit N] [--format table|json] [-v]
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments (flags, then `STOREFRONT_*` environment variables)
//! 2. Initialize tracing on stderr
//! 3. Build `AppConfig` (resolves the default database path)
//! 4. Run the menus; the setup lives in lib.rs so tests can drive it

use std::process::ExitCode;

use clap::Parser;

use storefront_cli::state::{AppConfig, CliArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    storefront_cli::init_tracing(args.verbose);

    let result = match AppConfig::from_args(args) {
        Ok(config) => storefront_cli::run(config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
