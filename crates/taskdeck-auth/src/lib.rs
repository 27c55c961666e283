//! # taskdeck-auth
//!
//! Session token layer and password hashing for the taskdeck service.
//!
//! - [`TokenService`] signs identity claims into a compact HS256 token and
//!   verifies presented tokens. `decrypt` returns `None` on *any* failure —
//!   bad signature, malformed token, expired — so callers only ever branch
//!   on "authenticated or not".
//! - [`password`] hashes and verifies passwords with Argon2id in PHC string
//!   format.
//!
//! Used identically by the HTTP layer's bearer check and by the relay's
//! connection handshake.

#![deny(unsafe_code)]

pub mod errors;
pub mod password;
pub mod token;

pub use errors::AuthError;
pub use token::TokenService;
