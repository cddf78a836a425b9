use async_trait::async_trait;
use derive_new::new;
use time::OffsetDateTime;

use crate::{
    data::{
        memberships::DynMembershipRepository,
        projects::DynProjectRepository,
        tasks::{DynTaskRepository, TaskStatus},
        users::UserId,
    },
    services::{
        AnalyticsService, AnalyticsServiceError, DashboardSummary,
    },
};

#[derive(new)]
pub struct DefaultAnalyticsService {
    memberships: DynMembershipRepository,
    projects: DynProjectRepository,
    tasks: DynTaskRepository,
}

#[async_trait]
impl AnalyticsService for DefaultAnalyticsService {
    async fn dashboard(
        &self,
        user: UserId,
    ) -> Result<DashboardSummary, AnalyticsServiceError> {
        let workspace_ids =
            self.memberships.workspace_ids_for_user(user).await?;

        if workspace_ids.is_empty() {
            return Ok(DashboardSummary::default());
        }

        let total_tasks =
            self.tasks.count_for_workspaces(&workspace_ids).await?;
        let completed_tasks = self
            .tasks
            .count_with_status(&workspace_ids, TaskStatus::Done)
            .await?;
        let in_progress_tasks = self
            .tasks
            .count_with_status(&workspace_ids, TaskStatus::InProgress)
            .await?;
        let overdue_tasks = self
            .tasks
            .count_overdue(&workspace_ids, OffsetDateTime::now_utc())
            .await?;
        let total_projects =
            self.projects.count_in_workspaces(&workspace_ids).await?;
        let tasks_by_status =
            self.tasks.count_by_status(&workspace_ids).await?;
        let tasks_by_priority =
            self.tasks.count_by_priority(&workspace_ids).await?;

        Ok(DashboardSummary::new(
            total_tasks,
            completed_tasks,
            in_progress_tasks,
            overdue_tasks,
            total_projects,
            workspace_ids.len() as i64,
            Vec::new(),
            tasks_by_status,
            tasks_by_priority,
        ))
    }
}
