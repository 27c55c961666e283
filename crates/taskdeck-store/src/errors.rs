//! Store error types.

use thiserror::Error;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool exhausted or unavailable.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type ("Task" or "User").
        entity: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// The caller is not the owner of the entity.
    #[error("{entity} {id} is not owned by the caller")]
    Forbidden {
        /// Entity type.
        entity: &'static str,
        /// The id that was accessed.
        id: String,
    },

    /// Validation failure.
    #[error("validation error: {0}")]
    Validation(String),

    /// Email address already registered.
    #[error("email already registered: {0}")]
    EmailTaken(String),
}

impl StoreError {
    /// Create a not-found error for a task.
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Task",
            id: id.into(),
        }
    }

    /// Create a not-found error for a user.
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "User",
            id: id.into(),
        }
    }

    /// Create a forbidden error for a task.
    pub fn task_forbidden(id: impl Into<String>) -> Self {
        Self::Forbidden {
            entity: "Task",
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_not_found_display() {
        let err = StoreError::task_not_found("task-123");
        assert_eq!(err.to_string(), "Task not found: task-123");
    }

    #[test]
    fn forbidden_display() {
        let err = StoreError::task_forbidden("task-9");
        assert_eq!(err.to_string(), "Task task-9 is not owned by the caller");
    }

    #[test]
    fn email_taken_display() {
        let err = StoreError::EmailTaken("a@b.c".into());
        assert!(err.to_string().contains("a@b.c"));
    }

    #[test]
    fn database_from_rusqlite() {
        let sqlite_err =
            rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(1), Some("test".to_string()));
        let err = StoreError::from(sqlite_err);
        assert!(err.to_string().contains("database error"));
    }
}
