//! taskdeck server binary — wires the store, auth, notifier, and relay
//! together and starts the HTTP/WebSocket server.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use taskdeck_auth::TokenService;
use taskdeck_notify::{Notifier, NullNotifier, SmtpNotifier};
use taskdeck_relay::RoomRegistry;
use taskdeck_server::settings::{DEV_SECRET, Settings};
use taskdeck_server::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// taskdeck server.
#[derive(Parser, Debug)]
#[command(name = "taskdeck-server", about = "Task management server with real-time updates")]
struct Cli {
    /// Path to a JSON settings file.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings, 0 for auto-assign).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the SQLite database (overrides settings).
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings =
        Settings::load(cli.settings.as_deref()).context("Failed to load settings")?;
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(db_path) = cli.db_path {
        settings.database.path = db_path.display().to_string();
    }

    if settings.auth.secret == DEV_SECRET {
        warn!("using the built-in development token secret — set TASKDECK_AUTH_SECRET");
    }

    let db_path = PathBuf::from(&settings.database.path);
    ensure_parent_dir(&db_path)?;
    let pool = taskdeck_store::new_file(
        &settings.database.path,
        &taskdeck_store::ConnectionConfig::default(),
    )
    .with_context(|| format!("Failed to open database at {}", settings.database.path))?;
    {
        let conn = pool.get().context("Failed to acquire database connection")?;
        taskdeck_store::migrations::run_migrations(&conn).context("Failed to run migrations")?;
    }
    info!(path = %settings.database.path, "database ready");

    let notifier: Arc<dyn Notifier> = match &settings.smtp {
        Some(smtp) => {
            let notifier =
                SmtpNotifier::new(&smtp.to_config()).context("Failed to build SMTP notifier")?;
            Arc::new(notifier)
        }
        None => {
            info!("SMTP not configured, email notifications disabled");
            Arc::new(NullNotifier)
        }
    };

    let state = AppState {
        pool,
        tokens: Arc::new(TokenService::new(&settings.auth.secret)),
        notifier,
        relay: Arc::new(RoomRegistry::new()),
    };
    let app = taskdeck_server::router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "taskdeck server listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
