//! # taskdeck-core
//!
//! Foundation types for the taskdeck service. This crate provides the shared
//! vocabulary that all other taskdeck crates depend on:
//!
//! - **Users**: [`users::User`] and the register/login request bodies
//! - **Tasks**: [`tasks::Task`], [`tasks::TaskStatus`], create/update params
//! - **Claims**: [`claims::AuthClaims`] carried inside a signed session token
//! - **Relay frames**: [`relay::ClientFrame`] / [`relay::ServerFrame`] — the
//!   wire contract of the real-time update relay
//!
//! All serializable types use `camelCase` field names on the wire.
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other taskdeck crates.

#![deny(unsafe_code)]

pub mod claims;
pub mod relay;
pub mod tasks;
pub mod users;
