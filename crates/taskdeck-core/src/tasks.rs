//! Task types and request params.

use serde::{Deserialize, Serialize};

/// Task status in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not yet started.
    Pending,
    /// Currently being worked on.
    InProgress,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// SQL string representation (matches the `tasks.status` CHECK values).
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Parse the SQL string representation back into a status.
    #[must_use]
    pub fn from_sql(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A task owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task id (`task-` prefixed UUIDv7).
    pub id: String,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Optional due date (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Owning user id. Only this user may read, mutate, or delete the task.
    pub user_id: String,
    /// Creation timestamp (ISO 8601, UTC).
    pub created_at: String,
    /// Last-update timestamp (ISO 8601, UTC).
    pub updated_at: String,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateParams {
    /// Task title (required, non-empty).
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional due date (ISO 8601).
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Parameters for a partial task update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateParams {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New due date (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TaskUpdateParams {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_form_is_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: TaskStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(back, TaskStatus::InProgress);
    }

    #[test]
    fn status_sql_round_trip() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ] {
            assert_eq!(TaskStatus::from_sql(status.as_sql()), Some(status));
        }
        assert_eq!(TaskStatus::from_sql("archived"), None);
    }

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: "task-1".into(),
            title: "Write report".into(),
            description: None,
            status: TaskStatus::Pending,
            due_date: Some("2026-09-01T00:00:00Z".into()),
            user_id: "user-1".into(),
            created_at: "2026-08-01T00:00:00Z".into(),
            updated_at: "2026-08-01T00:00:00Z".into(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2026-09-01T00:00:00Z");
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["status"], "pending");
        // Absent description is omitted, not null
        assert!(json.get("description").is_none());
    }

    #[test]
    fn update_params_empty_detection() {
        assert!(TaskUpdateParams::default().is_empty());
        let update = TaskUpdateParams {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn update_params_from_partial_json() {
        let update: TaskUpdateParams =
            serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(update.status, Some(TaskStatus::Completed));
        assert!(update.title.is_none());
    }
}
