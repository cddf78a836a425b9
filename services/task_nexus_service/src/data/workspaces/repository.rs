use async_trait::async_trait;
use strum::{EnumDiscriminants, IntoDiscriminant};

use crate::data::{
    users::UserId,
    workspaces::{Workspace, WorkspaceId},
};

#[async_trait]
pub trait WorkspaceRepository: Send + Sync + 'static {
    async fn find_by_id(
        &self,
        id: WorkspaceId,
    ) -> Result<Option<Workspace>, WorkspaceRepositoryError>;

    /// Creates the workspace and the creator's owner membership atomically.
    async fn create_with_owner(
        &self,
        owner: UserId,
        name: &str,
        description: &str,
    ) -> Result<Workspace, WorkspaceRepositoryError>;

    /// Cascades to memberships, projects and tasks. Returns false when the
    /// workspace did not exist.
    async fn delete(
        &self,
        id: WorkspaceId,
    ) -> Result<bool, WorkspaceRepositoryError>;
}

pub type DynWorkspaceRepository = Box<dyn WorkspaceRepository>;

#[derive(Debug, thiserror::Error)]
#[error("workspace repository error: {inner}")]
pub struct WorkspaceRepositoryError {
    inner: WorkspaceRepositoryErrorInner,
    kind: WorkspaceRepositoryErrorKind,
}

impl WorkspaceRepositoryError {
    #[allow(unused)]
    pub fn kind(&self) -> WorkspaceRepositoryErrorKind {
        self.kind
    }
}

impl<T: Into<WorkspaceRepositoryErrorInner>> From<T>
    for WorkspaceRepositoryError
{
    fn from(inner: T) -> Self {
        let inner = inner.into();
        Self {
            kind: inner.discriminant(),
            inner,
        }
    }
}

#[derive(Debug, EnumDiscriminants, thiserror::Error)]
#[strum_discriminants(vis(pub), name(WorkspaceRepositoryErrorKind))]
pub enum WorkspaceRepositoryErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),
}
