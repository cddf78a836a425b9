use async_trait::async_trait;
use derive_new::new;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    data::{
        projects::{
            NewProject, Project, ProjectId, ProjectRepository,
            ProjectRepositoryError, ProjectWithCounts,
        },
        workspaces::WorkspaceId,
    },
    data_impl::sqlite::{timestamp, workspace_ids_csv},
};

#[derive(Debug, Clone, new)]
pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
pub(crate) struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub color: String,
    pub workspace_id: i64,
    pub created_at: i64,
}

impl ProjectRow {
    pub(crate) fn into_project(self) -> eyre::Result<Project> {
        Ok(Project::new(
            ProjectId::new(self.id),
            self.name,
            self.description,
            self.color,
            WorkspaceId::new(self.workspace_id),
            timestamp(self.created_at)?,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct ProjectWithCountsRow {
    #[sqlx(flatten)]
    project: ProjectRow,
    task_count: i64,
    completed_count: i64,
}

impl ProjectWithCountsRow {
    fn into_counted(self) -> eyre::Result<ProjectWithCounts> {
        Ok(ProjectWithCounts::new(
            self.project.into_project()?,
            self.task_count,
            self.completed_count,
        ))
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn find_by_id(
        &self,
        id: ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, name, description, color, workspace_id, created_at \
             FROM projects WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        row.map(ProjectRow::into_project)
            .transpose()
            .map_err(Into::into)
    }

    async fn create(
        &self,
        project: NewProject,
    ) -> Result<Project, ProjectRepositoryError> {
        let now = OffsetDateTime::now_utc();

        let project_id = sqlx::query(
            "INSERT INTO projects (name, description, color, workspace_id, \
             created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.color)
        .bind(project.workspace_id.0)
        .bind(now.unix_timestamp())
        .execute(&self.pool)
        .await
        .map_err(eyre::Report::new)?
        .last_insert_rowid();

        Ok(Project::new(
            ProjectId::new(project_id),
            project.name,
            project.description,
            project.color,
            project.workspace_id,
            now,
        ))
    }

    async fn delete(
        &self,
        id: ProjectId,
    ) -> Result<bool, ProjectRepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(eyre::Report::new)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_with_counts(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<ProjectWithCounts>, ProjectRepositoryError> {
        let rows = sqlx::query_as::<_, ProjectWithCountsRow>(
            "SELECT p.id, p.name, p.description, p.color, p.workspace_id, \
             p.created_at, \
             COUNT(t.id) AS task_count, \
             COALESCE(SUM(CASE WHEN t.status = 'done' THEN 1 ELSE 0 END), 0) \
                 AS completed_count \
             FROM projects p \
             LEFT JOIN tasks t ON t.project_id = p.id \
             WHERE p.workspace_id = ? \
             GROUP BY p.id \
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .bind(workspace_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        rows.into_iter()
            .map(|row| row.into_counted().map_err(Into::into))
            .collect()
    }

    async fn count_in_workspaces(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<i64, ProjectRepositoryError> {
        if workspace_ids.is_empty() {
            return Ok(0);
        }

        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM projects WHERE workspace_id IN ({})",
            workspace_ids_csv(workspace_ids)
        ))
        .fetch_one(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        Ok(count)
    }
}
