//! Per-client connection handle.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use taskdeck_core::claims::AuthClaims;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Result of queuing a frame on a connection's outbound channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Frame queued for delivery.
    Sent,
    /// Outbound channel full — the client is not keeping up.
    Full,
    /// Outbound channel closed — the client is gone.
    Closed,
}

/// A connected, authenticated relay client.
///
/// Holds the identity claims verified at the handshake, the set of task
/// rooms this connection has joined, and the bounded channel its writer
/// task drains. Frames are shared `Arc<String>`s so a broadcast serializes
/// its payload once regardless of room size.
pub struct ClientConnection {
    /// Unique connection id.
    pub id: String,
    claims: AuthClaims,
    tx: mpsc::Sender<Arc<String>>,
    rooms: RwLock<HashSet<String>>,
    drops: AtomicU64,
}

impl ClientConnection {
    /// Create a connection handle from its outbound channel sender.
    #[must_use]
    pub fn new(id: String, claims: AuthClaims, tx: mpsc::Sender<Arc<String>>) -> Self {
        Self {
            id,
            claims,
            tx,
            rooms: RwLock::new(HashSet::new()),
            drops: AtomicU64::new(0),
        }
    }

    /// Identity claims attached at the handshake.
    #[must_use]
    pub fn claims(&self) -> &AuthClaims {
        &self.claims
    }

    /// The authenticated user's id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.claims.user_id()
    }

    /// Join a task's room. Idempotent: joining twice is a single membership.
    pub fn join_room(&self, task_id: &str) {
        let _ = self.rooms.write().insert(task_id.to_string());
    }

    /// Leave a task's room. Idempotent: leaving a room never joined is a no-op.
    pub fn leave_room(&self, task_id: &str) {
        let _ = self.rooms.write().remove(task_id);
    }

    /// Whether this connection is currently a member of the task's room.
    #[must_use]
    pub fn in_room(&self, task_id: &str) -> bool {
        self.rooms.read().contains(task_id)
    }

    /// Number of rooms this connection belongs to.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.read().len()
    }

    /// Queue a frame for delivery. Never blocks; a full or closed channel is
    /// reported to the caller instead.
    pub fn send(&self, frame: Arc<String>) -> SendOutcome {
        match self.tx.try_send(frame) {
            Ok(()) => SendOutcome::Sent,
            Err(TrySendError::Full(_)) => {
                let _ = self.drops.fetch_add(1, Ordering::Relaxed);
                SendOutcome::Full
            }
            Err(TrySendError::Closed(_)) => SendOutcome::Closed,
        }
    }

    /// Total frames dropped on this connection because its channel was full.
    #[must_use]
    pub fn drop_count(&self) -> u64 {
        self.drops.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for ClientConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConnection")
            .field("id", &self.id)
            .field("user_id", &self.claims.sub)
            .field("rooms", &self.room_count())
            .finish_non_exhaustive()
    }
}
