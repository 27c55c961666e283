//! Session token signing and verification (HS256 JWT).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use taskdeck_core::claims::AuthClaims;
use taskdeck_core::users::User;
use tracing::debug;

use crate::errors::AuthError;

/// Session token validity period in seconds (24 hours).
const TOKEN_VALIDITY_SECS: i64 = 24 * 60 * 60;

/// Signs and verifies session tokens.
///
/// One instance is constructed at startup from the configured secret and
/// shared by the HTTP bearer extractor and the relay handshake.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity_secs: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("validity_secs", &self.validity_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service from a shared secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity_secs: TOKEN_VALIDITY_SECS,
        }
    }

    /// Create a token service with a custom validity period (tests).
    #[must_use]
    pub fn with_validity(secret: &str, validity_secs: i64) -> Self {
        Self {
            validity_secs,
            ..Self::new(secret)
        }
    }

    /// Sign a session token carrying the user's identity claims.
    ///
    /// The token expires `validity_secs` after issuance; expiry is checked
    /// only when the token is presented, never mid-session.
    pub fn encrypt(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = AuthClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now,
            exp: now + self.validity_secs,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenSign {
                reason: e.to_string(),
            })
    }

    /// Verify a presented token and return its claims.
    ///
    /// Returns `None` for any failure: malformed token, wrong signature,
    /// or expired. The caller treats all three identically.
    #[must_use]
    pub fn decrypt(&self, token: &str) -> Option<AuthClaims> {
        let validation = Validation::new(Algorithm::HS256);
        match jsonwebtoken::decode::<AuthClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "session token rejected");
                None
            }
        }
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

    #[test]
    fn encrypt_decrypt_round_trip() {
        let tokens = TokenService::new("test-secret");
        let token = tokens.encrypt(&make_user()).unwrap();
        let claims = tokens.decrypt(&token).expect("token should verify");
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn wrong_secret_rejected() {
        let signer = TokenService::new("secret-a");
        let verifier = TokenService::new("secret-b");
        let token = signer.encrypt(&make_user()).unwrap();
        assert!(verifier.decrypt(&token).is_none());
    }

    #[test]
    fn malformed_token_rejected() {
        let tokens = TokenService::new("test-secret");
        assert!(tokens.decrypt("not-a-token").is_none());
        assert!(tokens.decrypt("").is_none());
    }

    #[test]
    fn tampered_token_rejected() {
        let tokens = TokenService::new("test-secret");
        let mut token = tokens.encrypt(&make_user()).unwrap();
        // Flip a character in the payload segment
        let mid = token.len() / 2;
        let original = token.remove(mid);
        let flipped = if original == 'a' { 'b' } else { 'a' };
        token.insert(mid, flipped);
        assert!(tokens.decrypt(&token).is_none());
    }

    #[test]
    fn expired_token_rejected() {
        // Issue a token that expired an hour ago. jsonwebtoken's default
        // leeway is 60 seconds, so an hour is comfortably past it.
        let tokens = TokenService::with_validity("test-secret", -3600);
        let token = tokens.encrypt(&make_user()).unwrap();
        assert!(tokens.decrypt(&token).is_none());
    }
}
