use async_trait::async_trait;
use derive_new::new;
use strum::{EnumDiscriminants, IntoDiscriminant};
use time::OffsetDateTime;

use crate::data::{
    memberships::MembershipRepositoryError,
    projects::{
        Project, ProjectId, ProjectRepositoryError, ProjectWithCounts,
    },
    tasks::{
        Task, TaskId, TaskPatch, TaskPriority, TaskRepositoryError,
        TaskStatus, TaskWithAssignee,
    },
    users::UserId,
    workspaces::{WorkspaceId, WorkspaceRepositoryError},
};

#[derive(Debug, Clone, PartialEq, new)]
pub struct NewProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub workspace_id: WorkspaceId,
}

#[derive(Debug, Clone, PartialEq, new)]
pub struct NewTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<OffsetDateTime>,
    pub project_id: ProjectId,
}

/// Project and task lifecycle, scoped to workspaces the caller belongs to.
/// Every operation checks the caller's membership in the workspace that
/// owns the touched project or task.
#[async_trait]
pub trait BoardService: Send + Sync + 'static {
    /// Projects of a workspace, newest first, annotated with task counts.
    async fn list_projects(
        &self,
        caller: UserId,
        workspace: WorkspaceId,
    ) -> Result<Vec<ProjectWithCounts>, BoardServiceError>;

    async fn get_project(
        &self,
        caller: UserId,
        project: ProjectId,
    ) -> Result<Project, BoardServiceError>;

    async fn create_project(
        &self,
        caller: UserId,
        request: NewProjectRequest,
    ) -> Result<ProjectWithCounts, BoardServiceError>;

    async fn delete_project(
        &self,
        caller: UserId,
        project: ProjectId,
    ) -> Result<(), BoardServiceError>;

    /// Tasks of one project when `project` is given, otherwise tasks across
    /// every workspace the caller belongs to. Newest first, annotated with
    /// assignee usernames.
    async fn list_tasks(
        &self,
        caller: UserId,
        project: Option<ProjectId>,
    ) -> Result<Vec<TaskWithAssignee>, BoardServiceError>;

    async fn create_task(
        &self,
        caller: UserId,
        request: NewTaskRequest,
    ) -> Result<Task, BoardServiceError>;

    /// Sparse update. A field absent from the patch is left untouched; a
    /// field set to null clears the column. Marking the task completed
    /// forces its status to done, overriding any status in the same patch.
    async fn update_task(
        &self,
        caller: UserId,
        task: TaskId,
        patch: TaskPatch,
    ) -> Result<(), BoardServiceError>;

    async fn delete_task(
        &self,
        caller: UserId,
        task: TaskId,
    ) -> Result<(), BoardServiceError>;
}

pub type DynBoardService = Box<dyn BoardService>;

#[derive(Debug, thiserror::Error)]
#[error("{inner}")]
pub struct BoardServiceError {
    inner: BoardServiceErrorInner,
    kind: BoardServiceErrorKind,
}

impl BoardServiceError {
    pub fn kind(&self) -> BoardServiceErrorKind {
        self.kind
    }
}

impl<T: Into<BoardServiceErrorInner>> From<T> for BoardServiceError {
    fn from(inner: T) -> Self {
        let inner = inner.into();
        Self {
            kind: inner.discriminant(),
            inner,
        }
    }
}

#[derive(Debug, EnumDiscriminants, thiserror::Error)]
#[strum_discriminants(vis(pub), name(BoardServiceErrorKind))]
pub enum BoardServiceErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),

    #[error("Workspace not found")]
    WorkspaceNotFound,

    #[error("Project not found")]
    ProjectNotFound,

    #[error("Task not found")]
    TaskNotFound,

    #[error("Not a member")]
    NotAMember,

    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),

    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),

    #[error(transparent)]
    MembershipRepository(#[from] MembershipRepositoryError),

    #[error(transparent)]
    WorkspaceRepository(#[from] WorkspaceRepositoryError),
}
