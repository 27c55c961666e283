//! Notification message composition.
//!
//! Pure functions producing subject + HTML body pairs, kept separate from
//! the transport so the content is unit-testable without an SMTP server.

use taskdeck_core::users::User;

/// A composed email, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Compose the task-assignment email.
#[must_use]
pub fn task_assigned(user: &User, task_title: &str, task_description: &str) -> EmailContent {
    EmailContent {
        subject: format!("New Task Assigned: {task_title}"),
        html_body: format!(
            "<h1>New Task Assigned</h1>\
             <p>Hello {},</p>\
             <p>You have been assigned a new task:</p>\
             <h2>{task_title}</h2>\
             <p>{task_description}</p>\
             <p>Please log in to your account to view the details.</p>",
            user.name
        ),
    }
}

/// Compose the task-update email.
#[must_use]
pub fn task_updated(user: &User, task_title: &str, update_message: &str) -> EmailContent {
    EmailContent {
        subject: format!("Task Update: {task_title}"),
        html_body: format!(
            "<h1>Task Update</h1>\
             <p>Hello {},</p>\
             <p>There has been an update to your task:</p>\
             <h2>{task_title}</h2>\
             <p>{update_message}</p>\
             <p>Please log in to your account to view the changes.</p>",
            user.name
        ),
    }
}

/// Compose the task-completion email.
#[must_use]
pub fn task_completed(user: &User, task_title: &str) -> EmailContent {
    EmailContent {
        subject: format!("Task Completed: {task_title}"),
        html_body: format!(
            "<h1>Task Completed</h1>\
             <p>Hello {},</p>\
             <p>Congratulations! You have completed the following task:</p>\
             <h2>{task_title}</h2>\
             <p>Great job on completing your task!</p>",
            user.name
        ),
    }
}
