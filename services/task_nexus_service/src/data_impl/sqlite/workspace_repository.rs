use async_trait::async_trait;
use derive_new::new;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    data::{
        memberships::MemberRole,
        users::UserId,
        workspaces::{
            Workspace, WorkspaceId, WorkspaceRepository,
            WorkspaceRepositoryError,
        },
    },
    data_impl::sqlite::timestamp,
};

#[derive(Debug, Clone, new)]
pub struct SqliteWorkspaceRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
pub(crate) struct WorkspaceRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub owner_id: i64,
    pub created_at: i64,
}

impl WorkspaceRow {
    pub(crate) fn into_workspace(self) -> eyre::Result<Workspace> {
        Ok(Workspace::new(
            WorkspaceId::new(self.id),
            self.name,
            self.description,
            UserId::new(self.owner_id),
            timestamp(self.created_at)?,
        ))
    }
}

#[async_trait]
impl WorkspaceRepository for SqliteWorkspaceRepository {
    async fn find_by_id(
        &self,
        id: WorkspaceId,
    ) -> Result<Option<Workspace>, WorkspaceRepositoryError> {
        let row = sqlx::query_as::<_, WorkspaceRow>(
            "SELECT id, name, description, owner_id, created_at \
             FROM workspaces WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        row.map(WorkspaceRow::into_workspace)
            .transpose()
            .map_err(Into::into)
    }

    async fn create_with_owner(
        &self,
        owner: UserId,
        name: &str,
        description: &str,
    ) -> Result<Workspace, WorkspaceRepositoryError> {
        let now = OffsetDateTime::now_utc();
        let now_seconds = now.unix_timestamp();

        let mut tx = self.pool.begin().await.map_err(eyre::Report::new)?;

        let workspace_id = sqlx::query(
            "INSERT INTO workspaces (name, description, owner_id, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(owner.0)
        .bind(now_seconds)
        .execute(&mut *tx)
        .await
        .map_err(eyre::Report::new)?
        .last_insert_rowid();

        sqlx::query(
            "INSERT INTO workspace_memberships \
             (workspace_id, user_id, role, joined_at) VALUES (?, ?, ?, ?)",
        )
        .bind(workspace_id)
        .bind(owner.0)
        .bind(MemberRole::Owner.to_string())
        .bind(now_seconds)
        .execute(&mut *tx)
        .await
        .map_err(eyre::Report::new)?;

        tx.commit().await.map_err(eyre::Report::new)?;

        Ok(Workspace::new(
            WorkspaceId::new(workspace_id),
            name.to_string(),
            description.to_string(),
            owner,
            now,
        ))
    }

    async fn delete(
        &self,
        id: WorkspaceId,
    ) -> Result<bool, WorkspaceRepositoryError> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(eyre::Report::new)?;

        Ok(result.rows_affected() > 0)
    }
}
