use async_trait::async_trait;
use derive_new::new;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    data::{
        memberships::{
            JoinedWorkspace, MemberProfile, MemberRole,
            MembershipId, MembershipRepository, MembershipRepositoryError,
            MembershipRepositoryErrorInner, WorkspaceMembership,
        },
        users::UserId,
        workspaces::{Workspace, WorkspaceId},
    },
    data_impl::sqlite::{is_unique_violation, timestamp},
};

#[derive(Debug, Clone, new)]
pub struct SqliteMembershipRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct MembershipRow {
    id: i64,
    workspace_id: i64,
    user_id: i64,
    role: String,
    joined_at: i64,
}

impl MembershipRow {
    fn into_membership(self) -> eyre::Result<WorkspaceMembership> {
        Ok(WorkspaceMembership::new(
            MembershipId::new(self.id),
            WorkspaceId::new(self.workspace_id),
            UserId::new(self.user_id),
            self.role.parse::<MemberRole>().map_err(eyre::Report::new)?,
            timestamp(self.joined_at)?,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct JoinedWorkspaceRow {
    id: i64,
    name: String,
    description: String,
    owner_id: i64,
    created_at: i64,
    role: String,
}

impl JoinedWorkspaceRow {
    fn into_joined(self) -> eyre::Result<JoinedWorkspace> {
        Ok(JoinedWorkspace::new(
            Workspace::new(
                WorkspaceId::new(self.id),
                self.name,
                self.description,
                UserId::new(self.owner_id),
                timestamp(self.created_at)?,
            ),
            self.role.parse::<MemberRole>().map_err(eyre::Report::new)?,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct MemberProfileRow {
    id: i64,
    username: String,
    email: String,
    role: String,
}

impl MemberProfileRow {
    fn into_profile(self) -> eyre::Result<MemberProfile> {
        Ok(MemberProfile::new(
            UserId::new(self.id),
            self.username,
            self.email,
            self.role.parse::<MemberRole>().map_err(eyre::Report::new)?,
        ))
    }
}

#[async_trait]
impl MembershipRepository for SqliteMembershipRepository {
    async fn find(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<Option<WorkspaceMembership>, MembershipRepositoryError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            "SELECT id, workspace_id, user_id, role, joined_at \
             FROM workspace_memberships \
             WHERE workspace_id = ? AND user_id = ?",
        )
        .bind(workspace_id.0)
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        row.map(MembershipRow::into_membership)
            .transpose()
            .map_err(Into::into)
    }

    async fn create(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: MemberRole,
    ) -> Result<WorkspaceMembership, MembershipRepositoryError> {
        let now = OffsetDateTime::now_utc();

        let membership_id = sqlx::query(
            "INSERT INTO workspace_memberships \
             (workspace_id, user_id, role, joined_at) VALUES (?, ?, ?, ?)",
        )
        .bind(workspace_id.0)
        .bind(user_id.0)
        .bind(role.to_string())
        .bind(now.unix_timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| -> MembershipRepositoryError {
            if is_unique_violation(&e) {
                MembershipRepositoryErrorInner::AlreadyExists.into()
            } else {
                eyre::Report::new(e).into()
            }
        })?
        .last_insert_rowid();

        Ok(WorkspaceMembership::new(
            MembershipId::new(membership_id),
            workspace_id,
            user_id,
            role,
            now,
        ))
    }

    async fn workspaces_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<JoinedWorkspace>, MembershipRepositoryError> {
        let rows = sqlx::query_as::<_, JoinedWorkspaceRow>(
            "SELECT w.id, w.name, w.description, w.owner_id, w.created_at, \
             m.role \
             FROM workspace_memberships m \
             JOIN workspaces w ON w.id = m.workspace_id \
             WHERE m.user_id = ? \
             ORDER BY m.joined_at DESC, m.id DESC",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        rows.into_iter()
            .map(|row| row.into_joined().map_err(Into::into))
            .collect()
    }

    async fn workspace_ids_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WorkspaceId>, MembershipRepositoryError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT workspace_id FROM workspace_memberships \
             WHERE user_id = ?",
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        Ok(ids.into_iter().map(WorkspaceId::new).collect())
    }

    async fn members_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<MemberProfile>, MembershipRepositoryError> {
        let rows = sqlx::query_as::<_, MemberProfileRow>(
            "SELECT u.id, u.username, u.email, m.role \
             FROM workspace_memberships m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.workspace_id = ? \
             ORDER BY m.joined_at ASC, m.id ASC",
        )
        .bind(workspace_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        rows.into_iter()
            .map(|row| row.into_profile().map_err(Into::into))
            .collect()
    }
}
