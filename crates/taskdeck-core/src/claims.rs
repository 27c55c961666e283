//! Identity claims carried inside a signed session token.

use serde::{Deserialize, Serialize};

/// Decoded identity fields of a verified session token.
///
/// Produced only by a successful signature + expiry check; code holding an
/// `AuthClaims` value may trust it for the lifetime of the connection or
/// request that presented it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject: the user id.
    pub sub: String,
    /// User email.
    pub email: String,
    /// User display name.
    pub name: String,
    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds). Checked at verification time only.
    pub exp: i64,
}

impl AuthClaims {
    /// The user id this session belongs to.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_round_trip() {
        let claims = AuthClaims {
            sub: "user-1".into(),
            email: "alice@example.com".into(),
            name: "Alice".into(),
            iat: 1_770_000_000,
            exp: 1_770_086_400,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: AuthClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claims);
        assert_eq!(back.user_id(), "user-1");
    }
}
