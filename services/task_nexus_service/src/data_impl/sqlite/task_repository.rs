use async_trait::async_trait;
use derive_new::new;
use sqlx::{QueryBuilder, SqlitePool};
use time::OffsetDateTime;

use crate::{
    data::{
        projects::ProjectId,
        tasks::{
            NewTask, PriorityCount, StatusCount, Task, TaskId, TaskPatch,
            TaskPriority, TaskRepository, TaskRepositoryError, TaskStatus,
            TaskWithAssignee,
        },
        users::UserId,
        workspaces::WorkspaceId,
    },
    data_impl::sqlite::{timestamp, workspace_ids_csv},
};

#[derive(Debug, Clone, new)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: String,
    status: String,
    priority: String,
    due_date: Option<i64>,
    assignee_id: Option<i64>,
    completed: bool,
    created_by: i64,
    project_id: i64,
    created_at: i64,
}

impl TaskRow {
    fn into_task(self) -> eyre::Result<Task> {
        Ok(Task::new(
            TaskId::new(self.id),
            self.title,
            self.description,
            self.status.parse::<TaskStatus>().map_err(eyre::Report::new)?,
            self.priority
                .parse::<TaskPriority>()
                .map_err(eyre::Report::new)?,
            self.due_date.map(timestamp).transpose()?,
            self.assignee_id.map(UserId::new),
            self.completed,
            UserId::new(self.created_by),
            ProjectId::new(self.project_id),
            timestamp(self.created_at)?,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct TaskWithAssigneeRow {
    #[sqlx(flatten)]
    task: TaskRow,
    assignee_name: Option<String>,
}

impl TaskWithAssigneeRow {
    fn into_annotated(self) -> eyre::Result<TaskWithAssignee> {
        Ok(TaskWithAssignee::new(
            self.task.into_task()?,
            self.assignee_name,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct BucketCountRow {
    bucket: String,
    count: i64,
}

/// Restricts a task query to the projects of the given workspaces.
fn scope_clause(workspace_ids: &[WorkspaceId]) -> String {
    format!(
        "project_id IN (SELECT id FROM projects WHERE workspace_id IN ({}))",
        workspace_ids_csv(workspace_ids)
    )
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn find_by_id(
        &self,
        id: TaskId,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        let row = sqlx::query_as::<_, TaskRow>(
            "SELECT id, title, description, status, priority, due_date, \
             assignee_id, completed, created_by, project_id, created_at \
             FROM tasks WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        row.map(TaskRow::into_task).transpose().map_err(Into::into)
    }

    async fn create(
        &self,
        task: NewTask,
    ) -> Result<Task, TaskRepositoryError> {
        let now = OffsetDateTime::now_utc();

        let task_id = sqlx::query(
            "INSERT INTO tasks (title, description, status, priority, \
             due_date, project_id, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.to_string())
        .bind(task.priority.to_string())
        .bind(task.due_date.map(|d| d.unix_timestamp()))
        .bind(task.project_id.0)
        .bind(task.created_by.0)
        .bind(now.unix_timestamp())
        .execute(&self.pool)
        .await
        .map_err(eyre::Report::new)?
        .last_insert_rowid();

        Ok(Task::new(
            TaskId::new(task_id),
            task.title,
            task.description,
            task.status,
            task.priority,
            task.due_date,
            None,
            false,
            task.created_by,
            task.project_id,
            now,
        ))
    }

    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
    ) -> Result<bool, TaskRepositoryError> {
        if patch.is_empty() {
            return Ok(self.find_by_id(id).await?.is_some());
        }

        let mut builder = QueryBuilder::new("UPDATE tasks SET ");

        {
            let mut fields = builder.separated(", ");

            if let Some(title) = &patch.title {
                fields.push("title = ");
                fields.push_bind_unseparated(title);
            }

            if let Some(description) = &patch.description {
                fields.push("description = ");
                fields.push_bind_unseparated(description);
            }

            if let Some(status) = patch.status {
                fields.push("status = ");
                fields.push_bind_unseparated(status.to_string());
            }

            if let Some(priority) = patch.priority {
                fields.push("priority = ");
                fields.push_bind_unseparated(priority.to_string());
            }

            if let Some(due_date) = patch.due_date {
                fields.push("due_date = ");
                fields.push_bind_unseparated(
                    due_date.map(|d| d.unix_timestamp()),
                );
            }

            if let Some(assignee_id) = patch.assignee_id {
                fields.push("assignee_id = ");
                fields.push_bind_unseparated(assignee_id.map(|u| u.0));
            }

            if let Some(completed) = patch.completed {
                fields.push("completed = ");
                fields.push_bind_unseparated(completed);
            }
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id.0);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(eyre::Report::new)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(eyre::Report::new)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<TaskWithAssignee>, TaskRepositoryError> {
        let rows = sqlx::query_as::<_, TaskWithAssigneeRow>(
            "SELECT t.id, t.title, t.description, t.status, t.priority, \
             t.due_date, t.assignee_id, t.completed, t.created_by, \
             t.project_id, t.created_at, u.username AS assignee_name \
             FROM tasks t \
             LEFT JOIN users u ON u.id = t.assignee_id \
             WHERE t.project_id = ? \
             ORDER BY t.created_at DESC, t.id DESC",
        )
        .bind(project_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        rows.into_iter()
            .map(|row| row.into_annotated().map_err(Into::into))
            .collect()
    }

    async fn list_for_workspaces(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<Vec<TaskWithAssignee>, TaskRepositoryError> {
        if workspace_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, TaskWithAssigneeRow>(&format!(
            "SELECT t.id, t.title, t.description, t.status, t.priority, \
             t.due_date, t.assignee_id, t.completed, t.created_by, \
             t.project_id, t.created_at, u.username AS assignee_name \
             FROM tasks t \
             LEFT JOIN users u ON u.id = t.assignee_id \
             WHERE t.{} \
             ORDER BY t.created_at DESC, t.id DESC",
            scope_clause(workspace_ids)
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        rows.into_iter()
            .map(|row| row.into_annotated().map_err(Into::into))
            .collect()
    }

    async fn count_for_workspaces(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<i64, TaskRepositoryError> {
        if workspace_ids.is_empty() {
            return Ok(0);
        }

        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM tasks WHERE {}",
            scope_clause(workspace_ids)
        ))
        .fetch_one(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        Ok(count)
    }

    async fn count_with_status(
        &self,
        workspace_ids: &[WorkspaceId],
        status: TaskStatus,
    ) -> Result<i64, TaskRepositoryError> {
        if workspace_ids.is_empty() {
            return Ok(0);
        }

        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM tasks WHERE {} AND status = ?",
            scope_clause(workspace_ids)
        ))
        .bind(status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        Ok(count)
    }

    async fn count_overdue(
        &self,
        workspace_ids: &[WorkspaceId],
        now: OffsetDateTime,
    ) -> Result<i64, TaskRepositoryError> {
        if workspace_ids.is_empty() {
            return Ok(0);
        }

        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM tasks \
             WHERE {} AND due_date IS NOT NULL AND due_date < ? \
             AND status != ?",
            scope_clause(workspace_ids)
        ))
        .bind(now.unix_timestamp())
        .bind(TaskStatus::Done.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        Ok(count)
    }

    async fn count_by_status(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<Vec<StatusCount>, TaskRepositoryError> {
        if workspace_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, BucketCountRow>(&format!(
            "SELECT status AS bucket, COUNT(*) AS count FROM tasks \
             WHERE {} GROUP BY status",
            scope_clause(workspace_ids)
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        rows.into_iter()
            .map(|row| {
                Ok(StatusCount::new(
                    row.bucket
                        .parse::<TaskStatus>()
                        .map_err(eyre::Report::new)?,
                    row.count,
                ))
            })
            .collect()
    }

    async fn count_by_priority(
        &self,
        workspace_ids: &[WorkspaceId],
    ) -> Result<Vec<PriorityCount>, TaskRepositoryError> {
        if workspace_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, BucketCountRow>(&format!(
            "SELECT priority AS bucket, COUNT(*) AS count FROM tasks \
             WHERE {} GROUP BY priority",
            scope_clause(workspace_ids)
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        rows.into_iter()
            .map(|row| {
                Ok(PriorityCount::new(
                    row.bucket
                        .parse::<TaskPriority>()
                        .map_err(eyre::Report::new)?,
                    row.count,
                ))
            })
            .collect()
    }
}
