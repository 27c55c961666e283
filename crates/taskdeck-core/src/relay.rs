//! Wire contract of the real-time update relay.
//!
//! JSON text frames over a WebSocket, tagged by `type`. Client-originated
//! frames join/leave a task's room or push an update into it; the single
//! server-originated frame fans an update out to every member of the room.
//!
//! The `update` payload is an arbitrary JSON object — the relay is a dumb
//! pipe and does not validate it against the task schema. Validation happens
//! in the HTTP update path before anything reaches the relay.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames a client sends to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientFrame {
    /// Join the broadcast group for a task. Idempotent.
    #[serde(rename_all = "camelCase")]
    JoinTaskRoom {
        /// Task id naming the room.
        task_id: String,
    },
    /// Leave the broadcast group for a task. Idempotent, no-op if absent.
    #[serde(rename_all = "camelCase")]
    LeaveTaskRoom {
        /// Task id naming the room.
        task_id: String,
    },
    /// Push an update into a task's room.
    #[serde(rename_all = "camelCase")]
    TaskUpdate {
        /// Task id naming the room.
        task_id: String,
        /// Opaque partial-update payload.
        update: Value,
    },
}

/// Payload of a fanned-out update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdated {
    /// Task id naming the room the update was broadcast to.
    pub task_id: String,
    /// Opaque partial-update payload, exactly as received.
    pub update: Value,
}

/// Frames the relay sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerFrame {
    /// An update was broadcast to a room this connection belongs to.
    TaskUpdated(TaskUpdated),
}
