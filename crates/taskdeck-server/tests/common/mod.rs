#![allow(missing_docs, dead_code)]

//! Shared harness for end-to-end tests: spawns the real server on an
//! ephemeral port with a temp-file database and a recording notifier.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use taskdeck_auth::TokenService;
use taskdeck_core::users::User;
use taskdeck_notify::{Notifier, NotifyError};
use taskdeck_relay::RoomRegistry;
use taskdeck_server::router;
use taskdeck_server::state::AppState;

/// Secret shared by the spawned server and any tokens tests mint directly.
pub const TEST_SECRET: &str = "e2e-secret";

/// One recorded notification.
#[derive(Debug, Clone)]
pub struct RecordedEmail {
    pub kind: &'static str,
    pub to: String,
    pub title: String,
}

/// Notifier that records instead of sending.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<RecordedEmail>>,
}

impl RecordingNotifier {
    fn record(&self, kind: &'static str, user: &User, title: &str) {
        self.sent.lock().unwrap().push(RecordedEmail {
            kind,
            to: user.email.clone(),
            title: title.to_string(),
        });
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.sent.lock().unwrap().iter().map(|e| e.kind).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn task_assigned(
        &self,
        user: &User,
        task_title: &str,
        _task_description: &str,
    ) -> Result<(), NotifyError> {
        self.record("assigned", user, task_title);
        Ok(())
    }

    async fn task_updated(
        &self,
        user: &User,
        task_title: &str,
        _update_message: &str,
    ) -> Result<(), NotifyError> {
        self.record("updated", user, task_title);
        Ok(())
    }

    async fn task_completed(&self, user: &User, task_title: &str) -> Result<(), NotifyError> {
        self.record("completed", user, task_title);
        Ok(())
    }
}

/// A running server instance.
pub struct TestServer {
    pub base_url: String,
    pub ws_url: String,
    pub notifier: Arc<RecordingNotifier>,
    _dir: tempfile::TempDir,
}

/// Spawn the full app on an ephemeral port.
pub async fn spawn() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("e2e.db");
    let pool = taskdeck_store::new_file(
        db_path.to_str().unwrap(),
        &taskdeck_store::ConnectionConfig::default(),
    )
    .unwrap();
    {
        let conn = pool.get().unwrap();
        taskdeck_store::migrations::run_migrations(&conn).unwrap();
    }

    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState {
        pool,
        tokens: Arc::new(TokenService::new(TEST_SECRET)),
        notifier: notifier.clone(),
        relay: Arc::new(RoomRegistry::new()),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    }));

    TestServer {
        base_url: format!("http://{addr}"),
        ws_url: format!("ws://{addr}"),
        notifier,
        _dir: dir,
    }
}

/// Register a user and return `(user, token)`.
pub async fn register(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    name: &str,
) -> (serde_json::Value, String) {
    let response = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&serde_json::json!({
            "email": email,
            "password": "hunter2",
            "name": name,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200, "register should succeed");
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();
    (body["user"].clone(), token)
}

/// Create a task as `token` and return its JSON.
pub async fn create_task(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    title: &str,
) -> serde_json::Value {
    let response = client
        .post(format!("{base_url}/api/tasks"))
        .bearer_auth(token)
        .json(&serde_json::json!({ "title": title }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201, "task create should succeed");
    let body: serde_json::Value = response.json().await.unwrap();
    body["task"].clone()
}

/// Let in-flight relay frames settle.
pub async fn settle() {
    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
}
