//! # taskdeck-relay
//!
//! The real-time update relay: a thin in-process pub/sub layer fanning task
//! updates out to connected clients.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `connection` | Per-client handle: outbound queue, room memberships |
//! | `rooms` | Registry: add/remove connections, join/leave, broadcast |
//!
//! ## Semantics
//!
//! - Rooms are keyed by task id; membership is a set on each connection, so
//!   an empty room is an inert predicate rather than a stored object.
//! - `broadcast` delivers to every member of the room — sender included —
//!   best-effort, at-most-once per recipient. Per-origin order is preserved
//!   by each connection's single outbound queue.
//! - Removing a connection (explicit close or network failure) releases all
//!   of its room memberships at once. No drain, no retry, no ack.
//!
//! The relay never touches the task store: the HTTP layer validates and
//! persists, then hands the applied update to [`rooms::RoomRegistry::broadcast`].

#![deny(unsafe_code)]

pub mod connection;
pub mod rooms;

pub use connection::{ClientConnection, SendOutcome};
pub use rooms::RoomRegistry;
