//! SQL data access for tasks.
//!
//! Stateless methods over `&Connection` — pure translation between Rust
//! types and SQL. Ownership checks live in the service layer, not here.

use rusqlite::{Connection, OptionalExtension, Row, params};
use taskdeck_core::tasks::{Task, TaskCreateParams, TaskStatus, TaskUpdateParams};

use crate::errors::StoreError;
use crate::users::{generate_id, now_iso};

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let status_sql: String = row.get("status")?;
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status: TaskStatus::from_sql(&status_sql).unwrap_or(TaskStatus::Pending),
        due_date: row.get("due_date")?,
        user_id: row.get("user_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Task repository for SQL CRUD operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Create a new pending task owned by `user_id`.
    pub fn create(
        conn: &Connection,
        user_id: &str,
        params: &TaskCreateParams,
    ) -> Result<Task, StoreError> {
        let id = generate_id("task");
        let now = now_iso();
        let _ = conn.execute(
            "INSERT INTO tasks (id, user_id, title, description, status, due_date,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                id,
                user_id,
                params.title,
                params.description,
                TaskStatus::Pending.as_sql(),
                params.due_date,
                now,
            ],
        )?;

        Self::get(conn, &id)?.ok_or_else(|| StoreError::task_not_found(&id))
    }

    /// Get a task by id.
    pub fn get(conn: &Connection, id: &str) -> Result<Option<Task>, StoreError> {
        let task = conn
            .query_row("SELECT * FROM tasks WHERE id = ?1", params![id], task_from_row)
            .optional()?;
        Ok(task)
    }

    /// Apply a partial update. Returns the updated task, or `None` if absent.
    pub fn update(
        conn: &Connection,
        id: &str,
        updates: &TaskUpdateParams,
    ) -> Result<Option<Task>, StoreError> {
        // Build dynamic SET clause from the provided fields
        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ref title) = updates.title {
            sets.push("title = ?");
            values.push(Box::new(title.clone()));
        }
        if let Some(ref description) = updates.description {
            sets.push("description = ?");
            values.push(Box::new(description.clone()));
        }
        if let Some(status) = updates.status {
            sets.push("status = ?");
            values.push(Box::new(status.as_sql().to_string()));
        }
        if let Some(ref due_date) = updates.due_date {
            sets.push("due_date = ?");
            values.push(Box::new(due_date.clone()));
        }

        if sets.is_empty() {
            return Self::get(conn, id);
        }

        sets.push("updated_at = ?");
        values.push(Box::new(now_iso()));
        values.push(Box::new(id.to_string()));

        let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));
        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            values.iter().map(AsRef::as_ref).collect();
        let changed = conn.execute(&sql, params_refs.as_slice())?;
        if changed == 0 {
            return Ok(None);
        }

        Self::get(conn, id)
    }

    /// Delete a task. Returns whether a row was removed.
    pub fn delete(conn: &Connection, id: &str) -> Result<bool, StoreError> {
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// List a user's tasks, newest first.
    pub fn list_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Task>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT * FROM tasks WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC",
        )?;
        let tasks = stmt
            .query_map(params![user_id], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }
}
