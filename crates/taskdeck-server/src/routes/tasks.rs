//! Task CRUD handlers.
//!
//! Every handler runs under a verified [`Session`]; the store's service
//! layer enforces that only the owner can see or touch a task. Mutations
//! send the matching lifecycle email and, for updates, inform the relay
//! with the applied change after it has been persisted. A failed email is
//! logged and does not fail the request — the mutation already happened.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use serde_json::json;
use taskdeck_core::tasks::{TaskCreateParams, TaskUpdateParams};
use taskdeck_core::users::User;
use taskdeck_store::service::TaskService;
use taskdeck_store::users::UserRepository;
use tracing::warn;

use crate::errors::ApiError;
use crate::extract::Session;
use crate::state::AppState;

fn internal(err: impl std::error::Error + Send + Sync + 'static) -> ApiError {
    ApiError::Internal(anyhow::Error::new(err))
}

fn load_owner(state: &AppState, user_id: &str) -> Result<Option<User>, ApiError> {
    let conn = state.pool.get().map_err(internal)?;
    Ok(UserRepository::get(&conn, user_id)?)
}

/// `GET /api/tasks` — list the caller's tasks, newest first.
pub async fn list(
    session: Session,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let tasks = {
        let conn = state.pool.get().map_err(internal)?;
        TaskService::list_tasks(&conn, session.user_id())?
    };
    Ok(Json(json!({ "tasks": tasks })))
}

/// `POST /api/tasks` — create a task owned by the caller.
pub async fn create(
    session: Session,
    State(state): State<AppState>,
    Json(params): Json<TaskCreateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let task = {
        let conn = state.pool.get().map_err(internal)?;
        TaskService::create_task(&conn, session.user_id(), &params)?
    };

    if let Some(user) = load_owner(&state, session.user_id())? {
        let description = task.description.as_deref().unwrap_or_default();
        if let Err(e) = state
            .notifier
            .task_assigned(&user, &task.title, description)
            .await
        {
            warn!(error = %e, task_id = %task.id, "failed to send assignment email");
        }
    }

    Ok((StatusCode::CREATED, Json(json!({ "task": task }))))
}

/// `GET /api/tasks/{id}` — fetch one owned task.
pub async fn get(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let task = {
        let conn = state.pool.get().map_err(internal)?;
        TaskService::get_task(&conn, &id, session.user_id())?
    };
    Ok(Json(json!({ "task": task })))
}

/// `PATCH /api/tasks/{id}` — partially update an owned task.
///
/// After persisting: a transition *into* completed sends the completion
/// email, any other effective change sends the update email; the applied
/// update is then broadcast to the task's relay room.
pub async fn update(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<TaskUpdateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = {
        let conn = state.pool.get().map_err(internal)?;
        TaskService::update_task(&conn, &id, session.user_id(), &updates)?
    };
    let task = &outcome.task;

    if !updates.is_empty() {
        if let Some(user) = load_owner(&state, session.user_id())? {
            let result = if outcome.completed_now() {
                state.notifier.task_completed(&user, &task.title).await
            } else {
                let message = format!("Your task \"{}\" has been updated.", task.title);
                state.notifier.task_updated(&user, &task.title, &message).await
            };
            if let Err(e) = result {
                warn!(error = %e, task_id = %task.id, "failed to send update email");
            }
        }

        let applied = serde_json::to_value(&updates).map_err(internal)?;
        state.relay.broadcast(&task.id, &applied).await;
    }

    Ok(Json(json!({ "task": task })))
}

/// `DELETE /api/tasks/{id}` — delete an owned task.
pub async fn remove(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    {
        let conn = state.pool.get().map_err(internal)?;
        TaskService::delete_task(&conn, &id, session.user_id())?;
    }
    Ok(Json(json!({ "success": true })))
}
