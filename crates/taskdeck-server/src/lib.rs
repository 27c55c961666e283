//! # taskdeck-server
//!
//! Axum HTTP + WebSocket server for the taskdeck service.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `settings` | Layered configuration: defaults, JSON file, env overrides |
//! | `state` | Shared application state injected into every handler |
//! | `errors` | Domain-error → HTTP response mapping |
//! | `extract` | Bearer-token session extractor |
//! | `routes` | Auth, task, and health handlers |
//! | `ws` | Relay endpoint: handshake auth, frame dispatch, teardown |
//!
//! ## Data flow
//!
//! HTTP task mutations validate and persist through `taskdeck-store`, send
//! lifecycle emails through `taskdeck-notify`, then inform the relay. The
//! `/ws` endpoint authenticates at the handshake and from then on only
//! speaks the relay's frame protocol.

#![deny(unsafe_code)]

pub mod errors;
pub mod extract;
pub mod routes;
pub mod settings;
pub mod state;
pub mod ws;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route(
            "/api/tasks",
            get(routes::tasks::list).post(routes::tasks::create),
        )
        .route(
            "/api/tasks/{id}",
            get(routes::tasks::get)
                .patch(routes::tasks::update)
                .delete(routes::tasks::remove),
        )
        .route("/ws", get(ws::ws_handler))
        .route("/health", get(routes::health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
