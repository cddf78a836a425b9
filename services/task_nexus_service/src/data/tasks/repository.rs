use async_trait::async_trait;
use strum::{EnumDiscriminants, IntoDiscriminant};
use time::OffsetDateTime;

use crate::data::{
    projects::ProjectId,
    tasks::{
        NewTask, PriorityCount, StatusCount, Task, TaskId, TaskPatch,
        TaskStatus, TaskWithAssignee,
    },
    workspaces::WorkspaceId,
};

#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn find_by_id(
        &self,
        id: TaskId,
    ) -> Result<Option<Task>, TaskRepositoryError>;

    async fn create(
        &self,
        task: NewTask,
    ) -> Result<Task, TaskRepositoryError>;

    /// Applies the patch as written, touching only the fields it carries.
    /// Returns false when the task does not exist.
    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
    ) -> Result<bool, TaskRepositoryError>;

    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError>;

    /// Tasks of one project, newest first, annotated with assignee names.
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<TaskWithAssignee>, TaskRepositoryError>;

    /// Tasks across every project of the given workspaces, newest first.
    async fn list_for_workspaces(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<Vec<TaskWithAssignee>, TaskRepositoryError>;

    async fn count_for_workspaces(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<i64, TaskRepositoryError>;

    async fn count_with_status(
        &self,
        workspace_ids: &[WorkspaceId],
        status: TaskStatus,
    ) -> Result<i64, TaskRepositoryError>;

    /// Tasks past their due date that are not done yet.
    async fn count_overdue(
        &self,
        workspace_ids: &[WorkspaceId],
        now: OffsetDateTime,
    ) -> Result<i64, TaskRepositoryError>;

    async fn count_by_status(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<Vec<StatusCount>, TaskRepositoryError>;

    async fn count_by_priority(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<Vec<PriorityCount>, TaskRepositoryError>;
}

pub type DynTaskRepository = Box<dyn TaskRepository>;

#[derive(Debug, thiserror::Error)]
#[error("task repository error: {inner}")]
pub struct TaskRepositoryError {
    inner: TaskRepositoryErrorInner,
    kind: TaskRepositoryErrorKind,
}

impl TaskRepositoryError {
    #[allow(unused)]
    pub fn kind(&self) -> TaskRepositoryErrorKind {
        self.kind
    }
}

impl<T: Into<TaskRepositoryErrorInner>> From<T> for TaskRepositoryError {
    fn from(inner: T) -> Self {
        let inner = inner.into();
        Self {
            kind: inner.discriminant(),
            inner,
        }
    }
}

#[derive(Debug, EnumDiscriminants, thiserror::Error)]
#[strum_discriminants(vis(pub), name(TaskRepositoryErrorKind))]
pub enum TaskRepositoryErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),
}
