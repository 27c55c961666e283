//! Business logic layer for task management.
//!
//! Wraps the repositories with validation and exclusive-ownership
//! enforcement. Key rules:
//!
//! - A task is visible only to its owner: a lookup of someone else's task is
//!   [`StoreError::Forbidden`], an unknown id is [`StoreError::NotFound`] —
//!   the caller maps these to 403 and 404 respectively.
//! - Titles must be non-empty on create.
//! - Updates report the previous status so the caller can tell a transition
//!   *into* `completed` apart from any other change.

use rusqlite::Connection;
use taskdeck_core::tasks::{Task, TaskCreateParams, TaskStatus, TaskUpdateParams};

use crate::errors::StoreError;
use crate::tasks::TaskRepository;

/// Result of applying an update: the new row plus what the status was before.
#[derive(Debug, Clone)]
pub struct TaskUpdateOutcome {
    /// The task after the update.
    pub task: Task,
    /// Status before the update was applied.
    pub previous_status: TaskStatus,
}

impl TaskUpdateOutcome {
    /// Whether this update completed the task (transition *into* completed).
    #[must_use]
    pub fn completed_now(&self) -> bool {
        self.task.status == TaskStatus::Completed && self.previous_status != TaskStatus::Completed
    }
}

/// Task service with validation and ownership enforcement.
pub struct TaskService;

impl TaskService {
    /// Create a task owned by `user_id`.
    pub fn create_task(
        conn: &Connection,
        user_id: &str,
        params: &TaskCreateParams,
    ) -> Result<Task, StoreError> {
        if params.title.trim().is_empty() {
            return Err(StoreError::Validation("Title is required".to_string()));
        }
        TaskRepository::create(conn, user_id, params)
    }

    /// Get a task, enforcing that `user_id` owns it.
    pub fn get_task(conn: &Connection, id: &str, user_id: &str) -> Result<Task, StoreError> {
        let task = TaskRepository::get(conn, id)?.ok_or_else(|| StoreError::task_not_found(id))?;
        if task.user_id != user_id {
            return Err(StoreError::task_forbidden(id));
        }
        Ok(task)
    }

    /// Apply a partial update to an owned task.
    pub fn update_task(
        conn: &Connection,
        id: &str,
        user_id: &str,
        updates: &TaskUpdateParams,
    ) -> Result<TaskUpdateOutcome, StoreError> {
        let current = Self::get_task(conn, id, user_id)?;
        let task = TaskRepository::update(conn, id, updates)?
            .ok_or_else(|| StoreError::task_not_found(id))?;
        Ok(TaskUpdateOutcome {
            task,
            previous_status: current.status,
        })
    }

    /// Delete an owned task.
    pub fn delete_task(conn: &Connection, id: &str, user_id: &str) -> Result<(), StoreError> {
        let _ = Self::get_task(conn, id, user_id)?;
        let _ = TaskRepository::delete(conn, id)?;
        Ok(())
    }

    /// List the user's tasks, newest first.
    pub fn list_tasks(conn: &Connection, user_id: &str) -> Result<Vec<Task>, StoreError> {
        TaskRepository::list_for_user(conn, user_id)
    }
}
