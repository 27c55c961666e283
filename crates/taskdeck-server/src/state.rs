//! Shared application state.

use std::sync::Arc;

use taskdeck_auth::TokenService;
use taskdeck_notify::Notifier;
use taskdeck_relay::RoomRegistry;
use taskdeck_store::ConnectionPool;

/// State injected into every handler.
///
/// All collaborators are constructed once in the startup sequence and
/// injected here — nothing in the handlers reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: ConnectionPool,
    /// Session token signer/verifier, shared by HTTP auth and the relay handshake.
    pub tokens: Arc<TokenService>,
    /// Task lifecycle notification channel.
    pub notifier: Arc<dyn Notifier>,
    /// Real-time update relay.
    pub relay: Arc<RoomRegistry>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("notifier", &self.notifier.name())
            .field("connections", &self.relay.connection_count())
            .finish_non_exhaustive()
    }
}
