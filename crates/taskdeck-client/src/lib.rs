//! # taskdeck-client
//!
//! Client adapter for the real-time task update relay.
//!
//! One [`RelayClient`] per active session: it connects with the current
//! session token, exposes join/leave/emit plus callback registration for
//! incoming updates, and tears its connection down deterministically when
//! dropped. When the session token changes, the caller drops the old client
//! and connects a new one — credentials are never rotated on a live
//! connection. Rejoining rooms after a reconnect is the caller's job.
//!
//! Per-connection state machine:
//! `Connecting → Authenticated → (room memberships 0..N) → Disconnected`.
//! `Disconnected` is terminal — there is no automatic reconnect at this
//! layer.

#![deny(unsafe_code)]

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use parking_lot::RwLock;
use serde_json::Value;
use taskdeck_core::relay::{ClientFrame, ServerFrame, TaskUpdated};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, warn};

/// Errors from the relay client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the connection at the handshake.
    #[error("connection rejected with HTTP status {status}")]
    Rejected {
        /// HTTP status of the refused upgrade (401 for auth failures).
        status: u16,
    },
    /// The WebSocket connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),
    /// A frame could not be serialized.
    #[error("failed to encode frame: {0}")]
    Encode(String),
    /// The connection is no longer open.
    #[error("connection closed")]
    Disconnected,
}

type UpdateCallback = Box<dyn Fn(TaskUpdated) + Send + Sync>;

/// A live, authenticated connection to the relay.
///
/// Cheap to share behind an `Arc`; dropped, it closes the connection
/// unconditionally and releases all room memberships server-side.
pub struct RelayClient {
    outbound: mpsc::UnboundedSender<String>,
    callbacks: Arc<RwLock<Vec<UpdateCallback>>>,
    writer: JoinHandle<()>,
    reader: JoinHandle<()>,
}

impl RelayClient {
    /// Connect to the relay at `base_url` (e.g. `ws://127.0.0.1:8080`),
    /// presenting the session token at the handshake.
    ///
    /// An invalid or expired token is rejected before the upgrade —
    /// [`ClientError::Rejected`] with status 401.
    pub async fn connect(base_url: &str, token: &str) -> Result<Self, ClientError> {
        let url = format!("{}/ws?token={token}", base_url.trim_end_matches('/'));
        let (socket, _response) = connect_async(url.as_str()).await.map_err(|e| match e {
            tungstenite::Error::Http(response) => ClientError::Rejected {
                status: response.status().as_u16(),
            },
            other => ClientError::Connect(other.to_string()),
        })?;
        debug!("relay connection established");

        let (mut ws_tx, mut ws_rx) = socket.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        let callbacks: Arc<RwLock<Vec<UpdateCallback>>> = Arc::new(RwLock::new(Vec::new()));

        let writer = tokio::spawn(async move {
            while let Some(frame) = outbound_rx.recv().await {
                if let Err(e) = ws_tx.send(Message::Text(frame.into())).await {
                    warn!(error = %e, "relay send failed, closing writer");
                    break;
                }
            }
            // Outbound channel closed: say goodbye if the socket still listens
            let _ = ws_tx.send(Message::Close(None)).await;
        });

        let reader_callbacks = Arc::clone(&callbacks);
        let reader = tokio::spawn(async move {
            while let Some(result) = ws_rx.next().await {
                match result {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerFrame>(&text) {
                        Ok(ServerFrame::TaskUpdated(event)) => {
                            for callback in reader_callbacks.read().iter() {
                                callback(event.clone());
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "ignoring unparseable relay frame");
                        }
                    },
                    Ok(Message::Close(_)) => {
                        debug!("relay closed the connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "relay read failed");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            outbound,
            callbacks,
            writer,
            reader,
        })
    }

    fn send_frame(&self, frame: &ClientFrame) -> Result<(), ClientError> {
        let json = serde_json::to_string(frame).map_err(|e| ClientError::Encode(e.to_string()))?;
        self.outbound
            .send(json)
            .map_err(|_| ClientError::Disconnected)
    }

    /// Join a task's broadcast room.
    pub fn join_task_room(&self, task_id: &str) -> Result<(), ClientError> {
        self.send_frame(&ClientFrame::JoinTaskRoom {
            task_id: task_id.to_string(),
        })
    }

    /// Leave a task's broadcast room.
    pub fn leave_task_room(&self, task_id: &str) -> Result<(), ClientError> {
        self.send_frame(&ClientFrame::LeaveTaskRoom {
            task_id: task_id.to_string(),
        })
    }

    /// Push an update into a task's room.
    pub fn emit_task_update(&self, task_id: &str, update: Value) -> Result<(), ClientError> {
        self.send_frame(&ClientFrame::TaskUpdate {
            task_id: task_id.to_string(),
            update,
        })
    }

    /// Register a callback invoked for every incoming `task-updated` frame.
    ///
    /// Callbacks accumulate for the lifetime of the connection; they run on
    /// the reader task, so keep them short.
    pub fn on_task_update(&self, callback: impl Fn(TaskUpdated) + Send + Sync + 'static) {
        self.callbacks.write().push(Box::new(callback));
    }

    /// Close the connection. Equivalent to dropping the client.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for RelayClient {
    fn drop(&mut self) {
        // Unconditional teardown: stop both halves, which closes the socket
        // and releases all room memberships server-side.
        self.writer.abort();
        self.reader.abort();
    }
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("callbacks", &self.callbacks.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_error_display() {
        let err = ClientError::Rejected { status: 401 };
        assert_eq!(err.to_string(), "connection rejected with HTTP status 401");
    }

    #[tokio::test]
    async fn connect_to_nothing_fails() {
        // Port 9 (discard) is not listening on loopback
        let result = RelayClient::connect("ws://127.0.0.1:9", "token").await;
        assert!(matches!(result, Err(ClientError::Connect(_))));
    }
}
