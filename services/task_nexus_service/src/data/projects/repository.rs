use async_trait::async_trait;
use strum::{EnumDiscriminants, IntoDiscriminant};

use crate::data::{
    projects::{NewProject, Project, ProjectId, ProjectWithCounts},
    workspaces::WorkspaceId,
};

#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    async fn find_by_id(
        &self,
        id: ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    async fn create(
        &self,
        project: NewProject,
    ) -> Result<Project, ProjectRepositoryError>;

    /// Cascades to the project's tasks. Returns false when the project did
    /// not exist.
    async fn delete(
        &self,
        id: ProjectId,
    ) -> Result<bool, ProjectRepositoryError>;

    /// Projects of a workspace, newest first, annotated with task counts.
    async fn list_with_counts(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<ProjectWithCounts>, ProjectRepositoryError>;

    async fn count_in_workspaces(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<i64, ProjectRepositoryError>;
}

pub type DynProjectRepository = Box<dyn ProjectRepository>;

#[derive(Debug, thiserror::Error)]
#[error("project repository error: {inner}")]
pub struct ProjectRepositoryError {
    inner: ProjectRepositoryErrorInner,
    kind: ProjectRepositoryErrorKind,
}

impl ProjectRepositoryError {
    #[allow(unused)]
    pub fn kind(&self) -> ProjectRepositoryErrorKind {
        self.kind
    }
}

impl<T: Into<ProjectRepositoryErrorInner>> From<T> for ProjectRepositoryError {
    fn from(inner: T) -> Self {
        let inner = inner.into();
        Self {
            kind: inner.discriminant(),
            inner,
        }
    }
}

#[derive(Debug, EnumDiscriminants, thiserror::Error)]
#[strum_discriminants(vis(pub), name(ProjectRepositoryErrorKind))]
pub enum ProjectRepositoryErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),
}
