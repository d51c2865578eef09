//! # Menu Commands
//!
//! One `impl App` block per group of menu entries.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here
//! ├── account.rs   ◄─── Create user, log in, log out
//! ├── shopping.rs  ◄─── Nearby stores, product list, orders
//! ├── manager.rs   ◄─── Product updates, reports, supply requests
//! └── admin.rs     ◄─── Admin menu (users and products)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  user menu choice "3"                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  App::place_order(&mut self) -> AppResult<()>                           │
//! │     prompts  ──► self.console.prompt_i64("Enter the storeID: ")         │
//! │     identity ──► self.current_user()   (from the session)               │
//! │     rules    ──► Store::ensure_within / Product::ensure_stock           │
//! │     write    ──► self.db.orders().place(..)                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Ok(())  ──► back to the menu                                           │
//! │  Err(e)  ──► App::report prints e.console_line(), back to the menu      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod account;
mod admin;
mod manager;
mod shopping;
