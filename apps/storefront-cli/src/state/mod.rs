//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │   Database   │  │  SessionState    │  │   AppConfig      │          │
//! │  │  (SQLite     │  │  session_id      │  │  database_path   │          │
//! │  │   pool)      │  │  logged-in User  │  │  radius, format  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  • Database: internal connection pool                                  │
//! │  • SessionState: owned by the menu loop, mutated on login/logout       │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{AppConfig, CliArgs};
pub use session::{ActiveSession, SessionState};
