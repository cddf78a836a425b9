use async_trait::async_trait;
use strum::{EnumDiscriminants, IntoDiscriminant};

use crate::data::{
    memberships::{
        JoinedWorkspace, MemberProfile, MemberRole, WorkspaceMembership,
    },
    users::UserId,
    workspaces::WorkspaceId,
};

#[async_trait]
pub trait MembershipRepository: Send + Sync + 'static {
    async fn find(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<Option<WorkspaceMembership>, MembershipRepositoryError>;

    /// The storage-level uniqueness constraint on (workspace, user) is the
    /// authoritative guard here; a violation surfaces as `AlreadyExists`
    /// even when two invites race past the application-level check.
    async fn create(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: MemberRole,
    ) -> Result<WorkspaceMembership, MembershipRepositoryError>;

    /// Every workspace the user belongs to, most recently joined first.
    async fn workspaces_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<JoinedWorkspace>, MembershipRepositoryError>;

    async fn workspace_ids_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WorkspaceId>, MembershipRepositoryError>;

    async fn members_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<MemberProfile>, MembershipRepositoryError>;
}

pub type DynMembershipRepository = Box<dyn MembershipRepository>;

#[derive(Debug, thiserror::Error)]
#[error("membership repository error: {inner}")]
pub struct MembershipRepositoryError {
    inner: MembershipRepositoryErrorInner,
    kind: MembershipRepositoryErrorKind,
}

impl MembershipRepositoryError {
    pub fn kind(&self) -> MembershipRepositoryErrorKind {
        self.kind
    }
}

impl<T: Into<MembershipRepositoryErrorInner>> From<T>
    for MembershipRepositoryError
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
#[strum_discriminants(vis(pub), name(MembershipRepositoryErrorKind))]
pub enum MembershipRepositoryErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),

    #[error("User already in workspace")]
    AlreadyExists,
}
