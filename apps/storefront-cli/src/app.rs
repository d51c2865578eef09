//! # Menu Loop
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Menu Flow                                       │
//! │                                                                         │
//! │  greeting                                                              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  open session in DB? ──yes──► "Welcome back, amy!" ──┐                  │
//! │     │ no                                             │                  │
//! │     ▼                                                │                  │
//! │  LOGIN MENU  1 create user / 2 log in / 9 exit       │                  │
//! │     │ logged in                                      │                  │
//! │     ▼                                                ▼                  │
//! │  USER MENU  1..10 ─► operation ─► back to USER MENU                    │
//! │     │ 20 log out (session closed) ─► LOGIN MENU                        │
//! │     │ 21 exit    (session kept)    ─► shutdown                         │
//! │     │ Ctrl-D                        ─► shutdown                         │
//! │     ▼                                                                   │
//! │  "Disconnecting from database...Done" / "Bye!"                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use serde::Serialize;
use storefront_core::{CoreError, User};
use storefront_db::Database;
use tracing::{debug, info};

use crate::console::Console;
use crate::error::{AppError, AppResult};
use crate::render::{self, OutputFormat};
use crate::state::{AppConfig, SessionState};

const SMILEY: &str = "
   .-\"\"\"\"\"-.
  /  .   .  \\
 |    __    |
  \\  \\__/  /
   '-.____.-'
";

/// What the user menu asked the outer loop to do next.
enum NextStep {
    LoggedOut,
    Exit,
}

/// The console application: database, configuration, session and I/O.
pub struct App<R, W> {
    pub(crate) db: Database,
    pub(crate) config: AppConfig,
    pub(crate) console: Console<R, W>,
    pub(crate) session: SessionState,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(db: Database, config: AppConfig, console: Console<R, W>) -> Self {
        App {
            db,
            config,
            console,
            session: SessionState::new(),
        }
    }

    /// Runs the menus until the user exits or input ends, then closes the
    /// database.
    pub async fn run(mut self) -> AppResult<Console<R, W>> {
        let outcome = self.main_loop().await;

        self.console.print("Disconnecting from database...")?;
        self.db.close().await;
        self.console.say("Done\n\nBye!")?;

        match outcome {
            Err(e) if !e.is_end_of_input() => Err(e),
            _ => Ok(self.console),
        }
    }

    async fn main_loop(&mut self) -> AppResult<()> {
        self.greeting()?;
        self.resume_session().await?;

        loop {
            if !self.session.is_logged_in() && !self.login_menu().await? {
                return Ok(());
            }

            match self.user_menu().await? {
                NextStep::LoggedOut => continue,
                NextStep::Exit => return Ok(()),
            }
        }
    }

    fn greeting(&mut self) -> AppResult<()> {
        self.console.say("\n\n*******************************************************")?;
        self.console.say("              User Interface")?;
        self.console.say("*******************************************************\n")
    }

    /// Picks up a session left open by a previous run.
    async fn resume_session(&mut self) -> AppResult<()> {
        if let Some((session, user)) = self.db.sessions().current().await? {
            info!(user_id = user.user_id, "Resuming open session");
            self.console
                .say(format!("Welcome back, {}!{}", user.name, SMILEY))?;
            self.session.begin(session.session_id, user);
        }
        Ok(())
    }

    /// Returns false when the user chose to exit.
    async fn login_menu(&mut self) -> AppResult<bool> {
        loop {
            self.console.say("MAIN MENU")?;
            self.console.say("---------")?;
            self.console.say("1. Create user")?;
            self.console.say("2. Log in")?;
            self.console.say("9. < EXIT")?;

            let choice = self.console.read_choice()?;
            debug!(choice, "Login menu choice");

            let result = match choice {
                1 => self.create_user().await,
                2 => self.log_in().await,
                9 => return Ok(false),
                _ => self.console.say("Unrecognized choice!"),
            };
            self.report(result)?;

            if self.session.is_logged_in() {
                return Ok(true);
            }
        }
    }

    async fn user_menu(&mut self) -> AppResult<NextStep> {
        loop {
            self.print_user_menu()?;

            let choice = self.console.read_choice()?;
            debug!(choice, "User menu choice");

            let result = match choice {
                1 => self.view_stores().await,
                2 => self.view_products().await,
                3 => self.place_order().await,
                4 => self.view_recent_orders().await,
                5 => self.update_product().await,
                6 => self.view_recent_updates().await,
                7 => self.view_popular_products().await,
                8 => self.view_popular_customers().await,
                9 => self.place_supply_request().await,
                10 => self.admin_menu().await,
                20 => {
                    let result = self.log_out().await;
                    self.report(result)?;
                    return Ok(NextStep::LoggedOut);
                }
                21 => return Ok(NextStep::Exit),
                _ => self.console.say("Unrecognized choice!"),
            };
            self.report(result)?;
        }
    }

    fn print_user_menu(&mut self) -> AppResult<()> {
        let limit = self.config.report_limit;
        let lines = [
            "MAIN MENU".to_string(),
            "---------".to_string(),
            format!("1. View Stores within {} miles", self.config.radius),
            "2. View Product List".to_string(),
            "3. Place a Order".to_string(),
            format!("4. View {limit} recent orders"),
            "5. Update Product".to_string(),
            format!("6. View {limit} recent Product Updates Info"),
            format!("7. View {limit} Popular Items"),
            format!("8. View {limit} Popular Customers"),
            "9. Place Product Supply Request to Warehouse".to_string(),
            "10. Admin System.".to_string(),
            ".........................".to_string(),
            "20. Log out".to_string(),
            "21. Exist the system".to_string(),
        ];
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    /// Prints a failed operation and carries on. End of input and console
    /// failures propagate. With `--format json` the error is printed as a
    /// JSON object.
    pub(crate) fn report(&mut self, result: AppResult<()>) -> AppResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_end_of_input() => Err(e),
            Err(e) => {
                debug!(code = ?e.code, message = %e.message, "Operation failed");
                let line = match self.config.format {
                    OutputFormat::Table => e.console_line(),
                    OutputFormat::Json => serde_json::to_string(&e)?,
                };
                self.console.say(line)
            }
        }
    }

    /// Prints report rows in the configured format.
    pub(crate) fn show_rows<T, F>(&mut self, headers: &[&str], rows: &[T], cells: F) -> AppResult<()>
    where
        T: Serialize,
        F: Fn(&T) -> Vec<String>,
    {
        let text = render::render(self.config.format, headers, rows, cells)?;
        self.console.say(text)
    }

    /// The logged-in user, re-read so role and location changes made in the
    /// admin menu apply immediately.
    pub(crate) async fn current_user(&self) -> AppResult<User> {
        let active = self
            .session
            .active()
            .ok_or_else(|| AppError::rejected("Please log in first."))?;

        let user_id = active.user.user_id;
        let user = self
            .db
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))?;

        Ok(user)
    }
}
