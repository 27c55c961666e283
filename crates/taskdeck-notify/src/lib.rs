//! # taskdeck-notify
//!
//! Email notifications for task lifecycle events: assignment (creation),
//! update, and completion.
//!
//! The [`Notifier`] trait is the seam the HTTP layer depends on. The mail
//! transport is constructed once at startup and injected — there is no
//! module-level transporter singleton. Implementations:
//!
//! - [`smtp::SmtpNotifier`] — SMTP delivery via lettre's async transport
//! - [`NullNotifier`] — used when mail is not configured; logs and succeeds

#![deny(unsafe_code)]

pub mod errors;
pub mod message;
pub mod smtp;

pub use errors::NotifyError;
pub use smtp::{SmtpConfig, SmtpNotifier};

use async_trait::async_trait;
use taskdeck_core::users::User;
use tracing::debug;

/// Sends task lifecycle notifications to a task's owner.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name, for logs.
    fn name(&self) -> &str;

    /// Notify the user a task was assigned to them (task creation).
    async fn task_assigned(
        &self,
        user: &User,
        task_title: &str,
        task_description: &str,
    ) -> Result<(), NotifyError>;

    /// Notify the user their task changed.
    async fn task_updated(
        &self,
        user: &User,
        task_title: &str,
        update_message: &str,
    ) -> Result<(), NotifyError>;

    /// Notify the user they completed a task.
    async fn task_completed(&self, user: &User, task_title: &str) -> Result<(), NotifyError>;
}

/// No-op notifier for deployments without SMTP configuration.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    fn name(&self) -> &str {
        "null"
    }

    async fn task_assigned(
        &self,
        user: &User,
        task_title: &str,
        _task_description: &str,
    ) -> Result<(), NotifyError> {
        debug!(to = %user.email, title = task_title, "mail disabled, skipping assignment email");
        Ok(())
    }

    async fn task_updated(
        &self,
        user: &User,
        task_title: &str,
        _update_message: &str,
    ) -> Result<(), NotifyError> {
        debug!(to = %user.email, title = task_title, "mail disabled, skipping update email");
        Ok(())
    }

    async fn task_completed(&self, user: &User, task_title: &str) -> Result<(), NotifyError> {
        debug!(to = %user.email, title = task_title, "mail disabled, skipping completion email");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user() -> User {
        User {
            id: "user-1".into(),
            email: "alice@example.com".into(),
            name: "Alice".into(),
            created_at: "2026-08-01T00:00:00Z".into(),
            updated_at: "2026-08-01T00:00:00Z".into(),
        }
    }

    #[tokio::test]
    async fn null_notifier_always_succeeds() {
        let notifier = NullNotifier;
        assert_eq!(notifier.name(), "null");
        notifier
            .task_assigned(&make_user(), "T", "desc")
            .await
            .unwrap();
        notifier.task_updated(&make_user(), "T", "msg").await.unwrap();
        notifier.task_completed(&make_user(), "T").await.unwrap();
    }
}
