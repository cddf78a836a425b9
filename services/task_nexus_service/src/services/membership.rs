use async_trait::async_trait;
use strum::{EnumDiscriminants, IntoDiscriminant};

use crate::data::{
    memberships::{
        JoinedWorkspace, MemberProfile, MembershipRepositoryError,
        WorkspaceMembership,
    },
    users::{UserId, UserRepositoryError},
    workspaces::{Workspace, WorkspaceId, WorkspaceRepositoryError},
};

#[async_trait]
pub trait MembershipService: Send + Sync + 'static {
    /// Every workspace the user belongs to, most recently joined first.
    async fn list_workspaces(
        &self,
        user: UserId,
    ) -> Result<Vec<JoinedWorkspace>, MembershipServiceError>;

    /// Membership-gated fetch: callers only see workspaces they belong to.
    async fn get_workspace(
        &self,
        caller: UserId,
        workspace: WorkspaceId,
    ) -> Result<Workspace, MembershipServiceError>;

    /// Creates the workspace with the caller as its owner, atomically from
    /// the caller's perspective.
    async fn create_workspace(
        &self,
        caller: UserId,
        name: &str,
        description: &str,
    ) -> Result<JoinedWorkspace, MembershipServiceError>;

    /// Owner-gated cascading delete.
    async fn delete_workspace(
        &self,
        caller: UserId,
        workspace: WorkspaceId,
    ) -> Result<(), MembershipServiceError>;

    /// Invites the user behind `email` into the workspace as a member.
    /// The inviter must belong to the workspace and hold an inviting role;
    /// the invitee must exist and not already be a member. The final create
    /// leans on the storage uniqueness constraint, so racing invites for
    /// the same pair produce exactly one membership.
    async fn invite(
        &self,
        inviter: UserId,
        workspace: WorkspaceId,
        email: &str,
    ) -> Result<(), MembershipServiceError>;

    async fn list_members(
        &self,
        caller: UserId,
        workspace: WorkspaceId,
    ) -> Result<Vec<MemberProfile>, MembershipServiceError>;

    /// The caller's membership in the workspace, or `WorkspaceNotFound` /
    /// `NotAMember` when the workspace or the binding is absent.
    async fn require_membership(
        &self,
        user: UserId,
        workspace: WorkspaceId,
    ) -> Result<WorkspaceMembership, MembershipServiceError>;
}

pub type DynMembershipService = Box<dyn MembershipService>;

#[derive(Debug, thiserror::Error)]
#[error("{inner}")]
pub struct MembershipServiceError {
    inner: MembershipServiceErrorInner,
    kind: MembershipServiceErrorKind,
}

impl MembershipServiceError {
    pub fn kind(&self) -> MembershipServiceErrorKind {
        self.kind
    }
}

impl<T: Into<MembershipServiceErrorInner>> From<T>
    for MembershipServiceError
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
#[strum_discriminants(vis(pub), name(MembershipServiceErrorKind))]
pub enum MembershipServiceErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),

    #[error("Workspace not found")]
    WorkspaceNotFound,

    #[error("Not a member")]
    NotAMember,

    #[error("No permission to invite")]
    CannotInvite,

    #[error("Only the workspace owner can delete it")]
    NotOwner,

    #[error("User not found")]
    UserNotFound,

    #[error("User already in workspace")]
    AlreadyMember,

    #[error(transparent)]
    WorkspaceRepository(#[from] WorkspaceRepositoryError),

    #[error(transparent)]
    MembershipRepository(#[from] MembershipRepositoryError),

    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
}
