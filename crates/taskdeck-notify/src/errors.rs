//! Notification error types.

use thiserror::Error;

/// Errors from sending a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// An email address failed to parse.
    #[error("invalid email address {address}: {reason}")]
    Address {
        /// The offending address.
        address: String,
        /// Error description.
        reason: String,
    },
    /// The message could not be built.
    #[error("failed to build email: {reason}")]
    Build {
        /// Error description.
        reason: String,
    },
    /// SMTP transport failure.
    #[error("SMTP send failed: {reason}")]
    Transport {
        /// Error description.
        reason: String,
    },
}
