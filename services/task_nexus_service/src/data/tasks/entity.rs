use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::data::{projects::ProjectId, users::UserId};

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[strum(serialize = "todo")]
    Todo,
    #[strum(serialize = "in_progress")]
    InProgress,
    #[strum(serialize = "review")]
    Review,
    #[strum(serialize = "done")]
    Done,
}

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    #[strum(serialize = "low")]
    Low,
    #[strum(serialize = "medium")]
    Medium,
    #[strum(serialize = "high")]
    High,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, new, ToSchema)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    pub assignee_id: Option<UserId>,
    pub completed: bool,
    pub created_by: UserId,
    pub project_id: ProjectId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    new,
    ToSchema,
)]
#[repr(transparent)]
pub struct TaskId(pub i64);

/// A task annotated with its assignee's username, when assigned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, new, ToSchema)]
pub struct TaskWithAssignee {
    #[serde(flatten)]
    pub task: Task,
    pub assignee_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, new)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<OffsetDateTime>,
    pub project_id: ProjectId,
    pub created_by: UserId,
}

/// Sparse task update. `None` leaves a field untouched; for the nullable
/// columns, `Some(None)` clears the value.
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(
        default,
        deserialize_with = "crate::utils::serde_ext::double_option_rfc3339"
    )]
    #[schema(value_type = Option<String>)]
    pub due_date: Option<Option<OffsetDateTime>>,
    #[serde(
        default,
        deserialize_with = "crate::utils::serde_ext::double_option"
    )]
    #[schema(value_type = Option<i64>)]
    pub assignee_id: Option<Option<UserId>>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Applies the completion coercion: marking a task completed forces its
    /// status to done, overriding any status carried in the same patch. The
    /// converse does not hold; a patch setting status to done on its own
    /// leaves the completed flag alone.
    pub fn normalized(mut self) -> Self {
        if self.completed == Some(true) {
            self.status = Some(TaskStatus::Done);
        }

        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.assignee_id.is_none()
            && self.completed.is_none()
    }
}

/// One dashboard breakdown bucket. Only observed statuses appear; there is
/// no zero-filling for statuses without tasks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, new, ToSchema)]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, new, ToSchema)]
pub struct PriorityCount {
    pub priority: TaskPriority,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completing_a_task_forces_done_status() {
        let patch = TaskPatch {
            status: Some(TaskStatus::Todo),
            completed: Some(true),
            ..TaskPatch::default()
        }
        .normalized();

        assert_eq!(patch.status, Some(TaskStatus::Done));
        assert_eq!(patch.completed, Some(true));
    }

    #[test]
    fn done_status_alone_does_not_touch_completed() {
        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..TaskPatch::default()
        }
        .normalized();

        assert_eq!(patch.status, Some(TaskStatus::Done));
        assert_eq!(patch.completed, None);
    }

    #[test]
    fn null_due_date_applies_while_absent_one_does_not() {
        let cleared: TaskPatch =
            serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        assert_eq!(cleared.due_date, Some(None));

        let untouched: TaskPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched.due_date, None);
    }
}
