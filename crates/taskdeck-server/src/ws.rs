//! Relay WebSocket endpoint.
//!
//! Authentication happens at the handshake: the session token arrives as a
//! `?token=` query parameter (browsers cannot set headers on a WebSocket)
//! or an `Authorization: Bearer` header. A missing or invalid token refuses
//! the upgrade with 401 — the connection is never accepted and then
//! dropped. On success the decoded claims ride on the connection for its
//! lifetime; expiry is not re-checked mid-connection.
//!
//! Teardown of any kind — client close, network error, slow-client
//! eviction — removes the connection from the registry, which releases all
//! of its room memberships. There is no explicit leave-all wire message.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use taskdeck_core::claims::AuthClaims;
use taskdeck_core::relay::ClientFrame;
use taskdeck_relay::ClientConnection;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::bearer_token;
use crate::state::AppState;

/// Outbound frame buffer per connection. A client further behind than this
/// starts dropping frames and is eventually evicted by the registry.
const OUTBOUND_BUFFER: usize = 64;

/// Handshake query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct WsQuery {
    /// Session token.
    #[serde(default)]
    pub token: Option<String>,
}

/// WebSocket upgrade handler with handshake authentication.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    let token = query
        .token
        .or_else(|| bearer_token(&headers).map(ToString::to_string));
    let Some(claims) = token.and_then(|t| state.tokens.decrypt(&t)) else {
        return ApiError::Unauthorized.into_response();
    };

    ws.on_upgrade(move |socket| handle_socket(socket, state, claims))
}

/// Drive one authenticated relay connection until it disconnects.
async fn handle_socket(socket: WebSocket, state: AppState, claims: AuthClaims) {
    let conn_id = format!("conn-{}", Uuid::now_v7());
    let (tx, mut outbound_rx) = mpsc::channel(OUTBOUND_BUFFER);
    let connection = Arc::new(ClientConnection::new(conn_id.clone(), claims, tx));
    state.relay.add(Arc::clone(&connection)).await;

    info!(conn_id = %conn_id, user = %connection.claims().email, "relay client connected");

    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Outbound broadcasts (relay -> client)
            frame = outbound_rx.recv() => {
                match frame {
                    Some(frame) => {
                        if let Err(e) = ws_tx.send(Message::Text(frame.as_str().into())).await {
                            debug!(conn_id = %conn_id, error = %e, "relay send failed");
                            break;
                        }
                    }
                    // Sender gone: the registry evicted this connection
                    None => break,
                }
            }

            // Inbound frames (client -> relay)
            result = ws_rx.next() => {
                match result {
                    Some(Ok(msg)) => handle_message(&conn_id, msg, &state).await,
                    Some(Err(e)) => {
                        debug!(conn_id = %conn_id, error = %e, "relay read failed");
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    // Implicit leave of every joined room, no drain
    state.relay.remove(&conn_id).await;
    info!(conn_id = %conn_id, user = %connection.claims().email, "relay client disconnected");
}

/// Dispatch one inbound message. Malformed frames are logged and ignored —
/// the relay drops what it cannot parse rather than closing the connection.
async fn handle_message(conn_id: &str, msg: Message, state: &AppState) {
    match msg {
        Message::Text(text) => match serde_json::from_str::<ClientFrame>(&text) {
            Ok(ClientFrame::JoinTaskRoom { task_id }) => {
                state.relay.join(conn_id, &task_id).await;
            }
            Ok(ClientFrame::LeaveTaskRoom { task_id }) => {
                state.relay.leave(conn_id, &task_id).await;
            }
            Ok(ClientFrame::TaskUpdate { task_id, update }) => {
                state.relay.broadcast(&task_id, &update).await;
            }
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "ignoring unparseable relay frame");
            }
        },
        Message::Binary(_) => {
            debug!(conn_id = %conn_id, "ignoring binary relay frame");
        }
        // Axum answers pings automatically; close falls out of the read loop
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) => {}
    }
}
