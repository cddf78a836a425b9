use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::data::{
    users::UserId,
    workspaces::{Workspace, WorkspaceId},
};

/// Governs invite authority inside a workspace; only owners and admins may
/// invite. There is no role-change operation in the current scope.
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
pub enum MemberRole {
    #[strum(serialize = "owner")]
    Owner,
    #[strum(serialize = "admin")]
    Admin,
    #[strum(serialize = "member")]
    Member,
}

impl MemberRole {
    pub fn can_invite(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

/// The (workspace, user) binding. At most one exists per pair, enforced by
/// the storage layer.
#[derive(Debug, Clone, PartialEq, new)]
pub struct WorkspaceMembership {
    pub id: MembershipId,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub joined_at: OffsetDateTime,
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
pub struct MembershipId(pub i64);

/// A workspace joined with the caller's role in it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, new, ToSchema)]
pub struct JoinedWorkspace {
    #[serde(flatten)]
    pub workspace: Workspace,
    pub role: MemberRole,
}

/// Member row as exposed by the member listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, new, ToSchema)]
pub struct MemberProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: MemberRole,
}
