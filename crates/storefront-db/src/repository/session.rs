//! # Session Repository
//!
//! Persisted login state. A session stays open until the user logs out, so
//! leaving the program with "Exist the system" and starting it again greets
//! the same user.
//!
//! ```text
//! start(user) ──► [open]  ── end(session_id) ──► [closed]
//!                   │
//!                   └── start(same user) closes it and opens a fresh one
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use super::timestamp_now;
use crate::error::{DbError, DbResult};
use storefront_core::{Session, User};

/// Repository for login sessions.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    /// Opens a session for `user_id`, closing any session it already had.
    pub async fn start(&self, user_id: i64) -> DbResult<Session> {
        debug!(user_id, "Starting session");

        let now = timestamp_now();
        let session = Session {
            session_id: Uuid::new_v4().to_string(),
            user_id,
            started_at: now,
            ended_at: None,
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE sessions SET ended_at = ?2 WHERE user_id = ?1 AND ended_at IS NULL")
            .bind(user_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO sessions (session_id, user_id, started_at) VALUES (?1, ?2, ?3)")
            .bind(&session.session_id)
            .bind(session.user_id)
            .bind(session.started_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(user_id, session_id = %session.session_id, "Session started");
        Ok(session)
    }

    /// Returns the most recently opened session that is still open, with its
    /// user.
    pub async fn current(&self) -> DbResult<Option<(Session, User)>> {
        debug!("Looking up open session");

        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT session_id, user_id, started_at, ended_at
            FROM sessions
            WHERE ended_at IS NULL
            ORDER BY started_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(session) = session else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, password_hash, latitude, longitude, user_type
            FROM users
            WHERE user_id = ?1
            "#,
        )
        .bind(session.user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(|u| (session, u)))
    }

    /// Closes a session (log out).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Unknown or already closed session
    pub async fn end(&self, session_id: &str) -> DbResult<()> {
        debug!(session_id = %session_id, "Ending session");

        let result = sqlx::query(
            "UPDATE sessions SET ended_at = ?2 WHERE session_id = ?1 AND ended_at IS NULL",
        )
        .bind(session_id)
        .bind(timestamp_now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Session", session_id));
        }

        info!(session_id = %session_id, "Session ended");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
