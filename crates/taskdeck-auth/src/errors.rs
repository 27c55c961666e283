//! Auth error types.

use thiserror::Error;

/// Errors from token signing and password hashing.
///
/// Verification failures are deliberately *not* errors: `decrypt` returns
/// `Option` and `verify_password` returns `bool`, so an attacker-controlled
/// input can never surface internals through an error message.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Failed to sign a session token.
    #[error("failed to sign session token: {reason}")]
    TokenSign {
        /// Error description.
        reason: String,
    },
    /// Failed to hash a password.
    #[error("failed to hash password: {reason}")]
    PasswordHash {
        /// Error description.
        reason: String,
    },
}
