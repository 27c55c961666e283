//! Room membership and update fan-out.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use metrics::counter;
use serde_json::Value;
use taskdeck_core::relay::{ServerFrame, TaskUpdated};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::connection::{ClientConnection, SendOutcome};

/// Maximum total lifetime frame drops before forcibly disconnecting a slow client.
const MAX_TOTAL_DROPS: u64 = 100;

/// Manages connected clients, room membership, and broadcast fan-out.
///
/// Join and leave trust the caller: no ownership check happens here — the
/// HTTP layer is the authority on whether a user may act on a task.
pub struct RoomRegistry {
    /// Connected clients indexed by connection id.
    connections: RwLock<HashMap<String, Arc<ClientConnection>>>,
    /// Atomic counter tracking total connections (avoids read-locking for count queries).
    active_count: AtomicUsize,
}

impl RoomRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            active_count: AtomicUsize::new(0),
        }
    }

    /// Register an authenticated connection.
    pub async fn add(&self, connection: Arc<ClientConnection>) {
        let mut conns = self.connections.write().await;
        if conns.insert(connection.id.clone(), connection).is_none() {
            let _ = self.active_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Remove a connection, releasing all of its room memberships at once.
    ///
    /// Called on any teardown path — explicit close, network error — and
    /// idempotent for ids that were never (or are no longer) registered.
    pub async fn remove(&self, connection_id: &str) {
        let mut conns = self.connections.write().await;
        if conns.remove(connection_id).is_some() {
            let _ = self.active_count.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Join a connection to a task's room. Idempotent; unknown ids are a no-op.
    pub async fn join(&self, connection_id: &str, task_id: &str) {
        let conns = self.connections.read().await;
        if let Some(conn) = conns.get(connection_id) {
            conn.join_room(task_id);
            debug!(conn_id = %connection_id, task_id, "joined task room");
        }
    }

    /// Remove a connection from a task's room. Idempotent; unknown ids are a no-op.
    pub async fn leave(&self, connection_id: &str, task_id: &str) {
        let conns = self.connections.read().await;
        if let Some(conn) = conns.get(connection_id) {
            conn.leave_room(task_id);
            debug!(conn_id = %connection_id, task_id, "left task room");
        }
    }

    /// Broadcast an update to every member of a task's room, sender included.
    ///
    /// Best-effort, at-most-once per recipient: a closed recipient channel is
    /// an implicit leave for that recipient only; a persistently full one is
    /// evicted after `MAX_TOTAL_DROPS` lifetime drops. Neither aborts
    /// delivery to the rest of the room. Broadcasting to an empty or unknown
    /// room is a no-op.
    pub async fn broadcast(&self, task_id: &str, update: &Value) {
        let frame = ServerFrame::TaskUpdated(TaskUpdated {
            task_id: task_id.to_string(),
            update: update.clone(),
        });
        let json = match serde_json::to_string(&frame) {
            Ok(j) => Arc::new(j),
            Err(e) => {
                warn!(task_id, error = %e, "failed to serialize task update");
                return;
            }
        };

        let mut to_remove = Vec::new();
        {
            // Read snapshot: membership mutation during iteration is impossible,
            // removals are deferred to the write pass below.
            let conns = self.connections.read().await;
            let mut recipients = 0u32;
            for conn in conns.values() {
                if !conn.in_room(task_id) {
                    continue;
                }
                recipients += 1;
                match conn.send(Arc::clone(&json)) {
                    SendOutcome::Sent => {}
                    SendOutcome::Closed => {
                        to_remove.push(conn.id.clone());
                    }
                    SendOutcome::Full => {
                        counter!("relay_broadcast_drops_total").increment(1);
                        let drops = conn.drop_count();
                        if drops >= MAX_TOTAL_DROPS {
                            warn!(conn_id = %conn.id, task_id, drops, "disconnecting slow client");
                            to_remove.push(conn.id.clone());
                        } else {
                            warn!(conn_id = %conn.id, task_id, total_drops = drops, "dropped update frame (channel full)");
                        }
                    }
                }
            }
            debug!(task_id, recipients, "broadcast task update");
        }

        if !to_remove.is_empty() {
            let mut conns = self.connections.write().await;
            for id in &to_remove {
                if conns.remove(id).is_some() {
                    let _ = self.active_count.fetch_sub(1, Ordering::Relaxed);
                }
            }
        }
    }

    /// Number of active connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }

    /// Connections currently joined to a task's room.
    pub async fn room_members(&self, task_id: &str) -> Vec<Arc<ClientConnection>> {
        let conns = self.connections.read().await;
        conns
            .values()
            .filter(|c| c.in_room(task_id))
            .cloned()
            .collect()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
