//! User types and auth request/response bodies.

use serde::{Deserialize, Serialize};

/// A registered user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id (`user-` prefixed UUIDv7).
    pub id: String,
    /// Email address (unique).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp (ISO 8601, UTC).
    pub created_at: String,
    /// Last-update timestamp (ISO 8601, UTC).
    pub updated_at: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// Display name.
    pub name: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Successful register/login response: the user plus a fresh session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user.
    pub user: User,
    /// Signed session token, valid for 24 hours.
    pub token: String,
}
