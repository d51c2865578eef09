//! # User Repository
//!
//! Accounts, authentication and the admin "update user" operation.
//!
//! ## Authentication Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Log In                                             │
//! │                                                                         │
//! │  "Enter name: amy" / "Enter password: ****"                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... FROM users WHERE name = ?1      (bound, never formatted)   │
//! │       │                                                                 │
//! │       ├── no row ─────────────────────────► None                        │
//! │       ▼                                                                 │
//! │  argon2 verify(password, password_hash)                                │
//! │       │                                                                 │
//! │       ├── mismatch ───────────────────────► None                        │
//! │       ▼                                                                 │
//! │  Some(User)                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing user and a wrong password are indistinguishable to the caller.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::password::{hash_password, verify_password};
use storefront_core::{NewUser, User, UserType, UserUpdate};

const USER_COLUMNS: &str = "user_id, name, password_hash, latitude, longitude, user_type";

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a self-service account. New accounts are always customers.
    ///
    /// ## Returns
    /// * `Ok(User)` - The stored user, with its generated id
    /// * `Err(DbError::UniqueViolation)` - The name is taken
    /// * `Err(DbError::Validation)` - Bad name, password or coordinates
    pub async fn create(&self, new_user: &NewUser) -> DbResult<User> {
        self.create_with_type(new_user, UserType::Customer).await
    }

    /// Inserts an account with an explicit role (seeding managers/admins).
    pub async fn create_with_type(&self, new_user: &NewUser, user_type: UserType) -> DbResult<User> {
        new_user.validate()?;

        debug!(name = %new_user.name, user_type = %user_type, "Creating user");

        let password_hash = hash_password(&new_user.password)?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, password_hash, latitude, longitude, user_type)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(new_user.name.trim())
        .bind(&password_hash)
        .bind(new_user.location.latitude)
        .bind(new_user.location.longitude)
        .bind(user_type)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("name", new_user.name.trim()),
            other => other,
        })?;

        let user_id = result.last_insert_rowid();
        info!(user_id, name = %new_user.name, "User created");

        self.get_by_id(user_id)
            .await?
            .ok_or_else(|| DbError::not_found("User", user_id))
    }

    /// Checks a name/password pair.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Credentials match
    /// * `Ok(None)` - Unknown name or wrong password
    pub async fn authenticate(&self, name: &str, password: &str) -> DbResult<Option<User>> {
        debug!(name = %name, "Authenticating user");

        let user = match self.get_by_name(name).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            debug!(name = %name, "Password mismatch");
            Ok(None)
        }
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, user_id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by exact name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE name = ?1"
        ))
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Lists every account ordered by id (admin view).
    pub async fn list_all(&self) -> DbResult<Vec<User>> {
        debug!("Listing all users");

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY user_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Overwrites an account (admin). The password is re-hashed.
    ///
    /// ## Returns
    /// * `Ok(User)` - The updated row
    /// * `Err(DbError::NotFound)` - No user with that id
    /// * `Err(DbError::UniqueViolation)` - The new name belongs to someone else
    pub async fn update(&self, user_id: i64, update: &UserUpdate) -> DbResult<User> {
        update.validate()?;

        debug!(user_id, "Updating user");

        let password_hash = hash_password(&update.password)?;

        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = ?2,
                password_hash = ?3,
                latitude = ?4,
                longitude = ?5,
                user_type = ?6
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id)
        .bind(update.name.trim())
        .bind(&password_hash)
        .bind(update.location.latitude)
        .bind(update.location.longitude)
        .bind(update.user_type)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("name", update.name.trim()),
            other => other,
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", user_id));
        }

        info!(user_id, user_type = %update.user_type, "User updated");

        self.get_by_id(user_id)
            .await?
            .ok_or_else(|| DbError::not_found("User", user_id))
    }

    /// Counts accounts (the seeder uses this to detect an already-seeded file).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use storefront_core::{GeoPoint, ValidationError};

    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            password: "secret".to_string(),
            location: GeoPoint::new(10.0, 20.0),
        }
    }

    #[tokio::test]
    async fn test_create_and_authenticate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        let user = users.create(&new_user("amy")).await.unwrap();
        assert_eq!(user.user_type, UserType::Customer);
        assert_ne!(user.password_hash, "secret");

        let ok = users.authenticate("amy", "secret").await.unwrap();
        assert_eq!(ok.map(|u| u.user_id), Some(user.user_id));

        assert!(users.authenticate("amy", "wrong").await.unwrap().is_none());
        assert!(users.authenticate("bob", "secret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        users.create(&new_user("amy")).await.unwrap();
        let err = users.create(&new_user("amy")).await.unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "name");
                assert_eq!(value, "amy");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_off_grid_location() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut user = new_user("amy");
        user.location = GeoPoint::new(-1.0, 20.0);

        let err = db.users().create(&user).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(db.users().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_changes_role_and_password() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();
        let user = users.create(&new_user("amy")).await.unwrap();

        let updated = users
            .update(
                user.user_id,
                &UserUpdate {
                    name: "amy2".to_string(),
                    password: "newpass".to_string(),
                    location: GeoPoint::new(1.0, 2.0),
                    user_type: UserType::Manager,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "amy2");
        assert_eq!(updated.user_type, UserType::Manager);
        assert!(users.authenticate("amy2", "newpass").await.unwrap().is_some());
        assert!(users.authenticate("amy", "secret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .users()
            .update(
                42,
                &UserUpdate {
                    name: "ghost".to_string(),
                    password: "pw".to_string(),
                    location: GeoPoint::new(1.0, 2.0),
                    user_type: UserType::Customer,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        users.create(&new_user("zed")).await.unwrap();
        users
            .create_with_type(&new_user("admin"), UserType::Admin)
            .await
            .unwrap();

        let all = users.list_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["zed", "admin"]);
        assert!(all[1].is_admin());
    }
}
