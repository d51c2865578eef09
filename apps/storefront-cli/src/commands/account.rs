//! # Account Commands
//!
//! Login menu entries and "20. Log out".
//!
//! Registration and login both open a persisted session, so a later run
//! starts with "Welcome back" until the user logs out.

use std::io::{BufRead, Write};

use storefront_core::{CoreError, GeoPoint, NewUser, User};
use storefront_db::DbError;
use tracing::{debug, info};

use crate::app::App;
use crate::error::AppResult;

impl<R: BufRead, W: Write> App<R, W> {
    /// "1. Create user": registers a customer and logs them in.
    pub(crate) async fn create_user(&mut self) -> AppResult<()> {
        let name = self.console.prompt("\tEnter name: ")?;
        let password = self.console.prompt("\tEnter password: ")?;
        let latitude = self.console.prompt_f64("\tEnter latitude: ")?;
        let longitude = self.console.prompt_f64("\tEnter longitude: ")?;

        let new_user = NewUser {
            name: name.trim().to_string(),
            password,
            location: GeoPoint::checked(latitude, longitude)?,
        };

        let user = self.db.users().create(&new_user).await?;
        self.console.say("User successfully created!")?;

        self.open_session(user).await
    }

    /// "2. Log in".
    pub(crate) async fn log_in(&mut self) -> AppResult<()> {
        let name = self.console.prompt("\tEnter name: ")?;
        let password = self.console.prompt("\tEnter password: ")?;

        let user = self
            .db
            .users()
            .authenticate(name.trim(), &password)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        self.open_session(user).await
    }

    /// "20. Log out": closes the session here and in the database.
    pub(crate) async fn log_out(&mut self) -> AppResult<()> {
        let Some(active) = self.session.end() else {
            return Ok(());
        };

        match self.db.sessions().end(&active.session_id).await {
            Ok(()) => info!(user_id = active.user.user_id, "Logged out"),
            // Another log-in already closed this session
            Err(DbError::NotFound { .. }) => {
                debug!(session_id = %active.session_id, "Session already closed");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    async fn open_session(&mut self, user: User) -> AppResult<()> {
        let session = self.db.sessions().start(user.user_id).await?;
        info!(user_id = user.user_id, name = %user.name, "Logged in");

        self.session.begin(session.session_id, user);
        Ok(())
    }
}
