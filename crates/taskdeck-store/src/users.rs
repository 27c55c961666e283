//! SQL data access for users.
//!
//! Stateless methods over `&Connection`. The password hash never leaves this
//! module except through [`UserCredentials`], which exists solely for the
//! login path's verification step.

use rusqlite::{Connection, OptionalExtension, Row, params};
use taskdeck_core::users::User;
use uuid::Uuid;

use crate::errors::StoreError;

/// Generate a prefixed UUIDv7 id.
pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}

/// Current UTC timestamp as an ISO 8601 string.
pub(crate) fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// A user row joined with its password hash, for credential verification.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// The user, as exposed to the rest of the service.
    pub user: User,
    /// Stored PHC-format password hash.
    pub password_hash: String,
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// User repository for SQL CRUD operations.
pub struct UserRepository;

impl UserRepository {
    /// Create a new user with an already-hashed password.
    ///
    /// Returns [`StoreError::EmailTaken`] if the email is registered.
    pub fn create(
        conn: &Connection,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        if Self::find_by_email(conn, email)?.is_some() {
            return Err(StoreError::EmailTaken(email.to_string()));
        }

        let id = generate_id("user");
        let now = now_iso();
        let _ = conn.execute(
            "INSERT INTO users (id, email, name, password_hash, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, email, name, password_hash, now],
        )?;

        Self::get(conn, &id)?.ok_or_else(|| StoreError::user_not_found(&id))
    }

    /// Get a user by id.
    pub fn get(conn: &Connection, id: &str) -> Result<Option<User>, StoreError> {
        let user = conn
            .query_row(
                "SELECT id, email, name, created_at, updated_at FROM users WHERE id = ?1",
                params![id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Look up a user and password hash by email, for login.
    pub fn find_by_email(
        conn: &Connection,
        email: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let creds = conn
            .query_row(
                "SELECT id, email, name, password_hash, created_at, updated_at
                 FROM users WHERE email = ?1",
                params![email],
                |row| {
                    Ok(UserCredentials {
                        user: user_from_row(row)?,
                        password_hash: row.get("password_hash")?,
                    })
                },
            )
            .optional()?;
        Ok(creds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn create_and_get() {
        let conn = setup_db();
        let user = UserRepository::create(&conn, "alice@example.com", "Alice", "hash").unwrap();
        assert!(user.id.starts_with("user-"));
        assert_eq!(user.email, "alice@example.com");

        let fetched = UserRepository::get(&conn, &user.id).unwrap().unwrap();
        assert_eq!(fetched, user);
    }

    #[test]
    fn get_unknown_returns_none() {
        let conn = setup_db();
        assert!(UserRepository::get(&conn, "user-missing").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_email_taken() {
        let conn = setup_db();
        let _ = UserRepository::create(&conn, "alice@example.com", "Alice", "h1").unwrap();
        let result = UserRepository::create(&conn, "alice@example.com", "Alias", "h2");
        assert!(matches!(result, Err(StoreError::EmailTaken(_))));
    }

    #[test]
    fn find_by_email_returns_hash() {
        let conn = setup_db();
        let user = UserRepository::create(&conn, "bob@example.com", "Bob", "the-hash").unwrap();
        let creds = UserRepository::find_by_email(&conn, "bob@example.com")
            .unwrap()
            .unwrap();
        assert_eq!(creds.user.id, user.id);
        assert_eq!(creds.password_hash, "the-hash");
    }

    #[test]
    fn find_by_unknown_email_returns_none() {
        let conn = setup_db();
        assert!(
            UserRepository::find_by_email(&conn, "nobody@example.com")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn ids_are_time_ordered() {
        let conn = setup_db();
        let a = UserRepository::create(&conn, "a@example.com", "A", "h").unwrap();
        let b = UserRepository::create(&conn, "b@example.com", "B", "h").unwrap();
        assert!(a.id < b.id);
    }
}
