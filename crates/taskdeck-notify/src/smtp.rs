//! SMTP notifier backed by lettre's async transport.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use taskdeck_core::users::User;
use tracing::{debug, info};

use crate::errors::NotifyError;
use crate::message::{self, EmailContent};
use crate::Notifier;

/// SMTP transport configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP host.
    pub host: String,
    /// SMTP port (587 for STARTTLS).
    pub port: u16,
    /// Optional username/password pair.
    pub username: Option<String>,
    /// Password, used only when `username` is set.
    pub password: Option<String>,
    /// Sender address for all notifications.
    pub from: String,
}

/// Notifier delivering over SMTP.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    /// Build an SMTP notifier from config (STARTTLS relay).
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotifyError::Transport {
                reason: e.to_string(),
            })?
            .port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        info!(host = %config.host, port = config.port, from = %config.from, "SMTP notifier initialized");

        Ok(Self {
            transport: builder.build(),
            from: config.from.clone(),
        })
    }

    async fn deliver(&self, to: &str, content: EmailContent) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(self.from.parse().map_err(|e| NotifyError::Address {
                address: self.from.clone(),
                reason: format!("{e}"),
            })?)
            .to(to.parse().map_err(|e| NotifyError::Address {
                address: to.to_string(),
                reason: format!("{e}"),
            })?)
            .subject(&content.subject)
            .header(ContentType::TEXT_HTML)
            .body(content.html_body)
            .map_err(|e| NotifyError::Build {
                reason: e.to_string(),
            })?;

        let _ = self
            .transport
            .send(email)
            .await
            .map_err(|e| NotifyError::Transport {
                reason: e.to_string(),
            })?;

        debug!(to, subject = %content.subject, "notification email sent");
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn task_assigned(
        &self,
        user: &User,
        task_title: &str,
        task_description: &str,
    ) -> Result<(), NotifyError> {
        let content = message::task_assigned(user, task_title, task_description);
        self.deliver(&user.email, content).await
    }

    async fn task_updated(
        &self,
        user: &User,
        task_title: &str,
        update_message: &str,
    ) -> Result<(), NotifyError> {
        let content = message::task_updated(user, task_title, update_message);
        self.deliver(&user.email, content).await
    }

    async fn task_completed(&self, user: &User, task_title: &str) -> Result<(), NotifyError> {
        let content = message::task_completed(user, task_title);
        self.deliver(&user.email, content).await
    }
}
