use async_trait::async_trait;
use derive_new::new;

use crate::{
    data::{
        memberships::{
            DynMembershipRepository, JoinedWorkspace, MemberProfile,
            MemberRole, MembershipRepositoryErrorKind, WorkspaceMembership,
        },
        users::{DynUserRepository, UserId},
        workspaces::{DynWorkspaceRepository, Workspace, WorkspaceId},
    },
    services::{
        MembershipService, MembershipServiceError,
        MembershipServiceErrorInner,
    },
};

#[derive(new)]
pub struct DefaultMembershipService {
    workspaces: DynWorkspaceRepository,
    memberships: DynMembershipRepository,
    users: DynUserRepository,
}

#[async_trait]
impl MembershipService for DefaultMembershipService {
    async fn list_workspaces(
        &self,
        user: UserId,
    ) -> Result<Vec<JoinedWorkspace>, MembershipServiceError> {
        Ok(self.memberships.workspaces_for_user(user).await?)
    }

    async fn get_workspace(
        &self,
        caller: UserId,
        workspace: WorkspaceId,
    ) -> Result<Workspace, MembershipServiceError> {
        self.require_membership(caller, workspace).await?;

        self.workspaces
            .find_by_id(workspace)
            .await?
            .ok_or_else(|| {
                MembershipServiceErrorInner::WorkspaceNotFound.into()
            })
    }

    async fn create_workspace(
        &self,
        caller: UserId,
        name: &str,
        description: &str,
    ) -> Result<JoinedWorkspace, MembershipServiceError> {
        let workspace = self
            .workspaces
            .create_with_owner(caller, name, description)
            .await?;

        tracing::info!(
            workspace = workspace.id.0,
            owner = caller.0,
            "created workspace"
        );

        Ok(JoinedWorkspace::new(workspace, MemberRole::Owner))
    }

    async fn delete_workspace(
        &self,
        caller: UserId,
        workspace: WorkspaceId,
    ) -> Result<(), MembershipServiceError> {
        let membership = self.require_membership(caller, workspace).await?;

        if membership.role != MemberRole::Owner {
            return Err(MembershipServiceErrorInner::NotOwner.into());
        }

        if !self.workspaces.delete(workspace).await? {
            return Err(MembershipServiceErrorInner::WorkspaceNotFound.into());
        }

        tracing::info!(workspace = workspace.0, "deleted workspace");

        Ok(())
    }

    async fn invite(
        &self,
        inviter: UserId,
        workspace: WorkspaceId,
        email: &str,
    ) -> Result<(), MembershipServiceError> {
        let membership = self.require_membership(inviter, workspace).await?;

        if !membership.role.can_invite() {
            return Err(MembershipServiceErrorInner::CannotInvite.into());
        }

        let invitee = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(MembershipServiceErrorInner::UserNotFound)?;

        if self.memberships.find(workspace, invitee.id).await?.is_some() {
            return Err(MembershipServiceErrorInner::AlreadyMember.into());
        }

        // The check above races against concurrent invites; the storage
        // uniqueness constraint is the authoritative guard.
        self.memberships
            .create(workspace, invitee.id, MemberRole::Member)
            .await
            .map_err(|e| match e.kind() {
                MembershipRepositoryErrorKind::AlreadyExists => {
                    MembershipServiceErrorInner::AlreadyMember.into()
                }
                _ => MembershipServiceError::from(
                    MembershipServiceErrorInner::MembershipRepository(e),
                ),
            })?;

        tracing::info!(
            workspace = workspace.0,
            invitee = invitee.id.0,
            "invited user into workspace"
        );

        Ok(())
    }

    async fn list_members(
        &self,
        caller: UserId,
        workspace: WorkspaceId,
    ) -> Result<Vec<MemberProfile>, MembershipServiceError> {
        self.require_membership(caller, workspace).await?;

        Ok(self.memberships.members_of_workspace(workspace).await?)
    }

    async fn require_membership(
        &self,
        user: UserId,
        workspace: WorkspaceId,
    ) -> Result<WorkspaceMembership, MembershipServiceError> {
        if let Some(membership) =
            self.memberships.find(workspace, user).await?
        {
            return Ok(membership);
        }

        if self.workspaces.find_by_id(workspace).await?.is_none() {
            return Err(
                MembershipServiceErrorInner::WorkspaceNotFound.into()
            );
        }

        Err(MembershipServiceErrorInner::NotAMember.into())
    }
}
