//! # taskdeck-store
//!
//! SQLite persistence for the taskdeck service.
//!
//! - **[`connection`]**: `r2d2` connection pool with WAL mode, foreign keys,
//!   and busy-timeout pragmas applied to every connection
//! - **[`migrations`]**: idempotent DDL for the `users` and `tasks` tables
//! - **[`users`]** / **[`tasks`]**: stateless repositories over
//!   `&rusqlite::Connection`
//! - **[`service`]**: business layer enforcing validation and exclusive
//!   task ownership on top of the repositories
//!
//! Repositories are pure SQL translation; every access-control decision
//! lives in [`service::TaskService`].

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod service;
pub mod tasks;
pub mod users;

pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection, new_file, new_in_memory};
pub use errors::StoreError;
