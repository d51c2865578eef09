//! # Session State
//!
//! Who is logged in for the lifetime of the menu loop. The database copy
//! (`sessions` table) is what survives a restart; this is the in-process
//! handle to it.

use storefront_core::User;

/// The logged-in user and their session id.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub session_id: String,
    pub user: User,
}

#[derive(Debug, Default)]
pub struct SessionState {
    active: Option<ActiveSession>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    pub fn begin(&mut self, session_id: String, user: User) {
        self.active = Some(ActiveSession { session_id, user });
    }

    /// Clears the session, returning it so the caller can close it in the
    /// database.
    pub fn end(&mut self) -> Option<ActiveSession> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::UserType;

    #[test]
    fn test_begin_and_end() {
        let mut state = SessionState::new();
        assert!(!state.is_logged_in());

        state.begin(
            "abc".to_string(),
            User {
                user_id: 1,
                name: "amy".to_string(),
                password_hash: String::new(),
                latitude: 1.0,
                longitude: 1.0,
                user_type: UserType::Customer,
            },
        );
        assert_eq!(state.active().map(|s| s.user.name.as_str()), Some("amy"));

        let ended = state.end().unwrap();
        assert_eq!(ended.session_id, "abc");
        assert!(!state.is_logged_in());
        assert!(state.end().is_none());
    }
}
