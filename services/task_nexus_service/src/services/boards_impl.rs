use async_trait::async_trait;
use derive_new::new;

use crate::{
    data::{
        memberships::DynMembershipRepository,
        projects::{
            DEFAULT_PROJECT_COLOR, DynProjectRepository, NewProject, Project,
            ProjectId, ProjectWithCounts,
        },
        tasks::{
            DynTaskRepository, NewTask, Task, TaskId, TaskPatch,
            TaskPriority, TaskStatus, TaskWithAssignee,
        },
        users::UserId,
        workspaces::{DynWorkspaceRepository, WorkspaceId},
    },
    services::{
        BoardService, BoardServiceError, BoardServiceErrorInner,
        NewProjectRequest, NewTaskRequest,
    },
};

#[derive(new)]
pub struct DefaultBoardService {
    projects: DynProjectRepository,
    tasks: DynTaskRepository,
    memberships: DynMembershipRepository,
    workspaces: DynWorkspaceRepository,
}

impl DefaultBoardService {
    async fn require_membership(
        &self,
        user: UserId,
        workspace: WorkspaceId,
    ) -> Result<(), BoardServiceError> {
        if self.memberships.find(workspace, user).await?.is_some() {
            return Ok(());
        }

        if self.workspaces.find_by_id(workspace).await?.is_none() {
            return Err(BoardServiceErrorInner::WorkspaceNotFound.into());
        }

        Err(BoardServiceErrorInner::NotAMember.into())
    }

    async fn accessible_project(
        &self,
        caller: UserId,
        project: ProjectId,
    ) -> Result<Project, BoardServiceError> {
        let project = self
            .projects
            .find_by_id(project)
            .await?
            .ok_or(BoardServiceErrorInner::ProjectNotFound)?;

        self.require_membership(caller, project.workspace_id).await?;

        Ok(project)
    }

    async fn accessible_task(
        &self,
        caller: UserId,
        task: TaskId,
    ) -> Result<Task, BoardServiceError> {
        let task = self
            .tasks
            .find_by_id(task)
            .await?
            .ok_or(BoardServiceErrorInner::TaskNotFound)?;

        self.accessible_project(caller, task.project_id).await?;

        Ok(task)
    }
}

#[async_trait]
impl BoardService for DefaultBoardService {
    async fn list_projects(
        &self,
        caller: UserId,
        workspace: WorkspaceId,
    ) -> Result<Vec<ProjectWithCounts>, BoardServiceError> {
        self.require_membership(caller, workspace).await?;

        Ok(self.projects.list_with_counts(workspace).await?)
    }

    async fn get_project(
        &self,
        caller: UserId,
        project: ProjectId,
    ) -> Result<Project, BoardServiceError> {
        self.accessible_project(caller, project).await
    }

    async fn create_project(
        &self,
        caller: UserId,
        request: NewProjectRequest,
    ) -> Result<ProjectWithCounts, BoardServiceError> {
        self.require_membership(caller, request.workspace_id).await?;

        let project = self
            .projects
            .create(NewProject::new(
                request.name,
                request.description.unwrap_or_default(),
                request
                    .color
                    .unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
                request.workspace_id,
            ))
            .await?;

        tracing::info!(
            project = project.id.0,
            workspace = project.workspace_id.0,
            "created project"
        );

        Ok(ProjectWithCounts::new(project, 0, 0))
    }

    async fn delete_project(
        &self,
        caller: UserId,
        project: ProjectId,
    ) -> Result<(), BoardServiceError> {
        let project = self.accessible_project(caller, project).await?;

        if !self.projects.delete(project.id).await? {
            return Err(BoardServiceErrorInner::ProjectNotFound.into());
        }

        tracing::info!(project = project.id.0, "deleted project");

        Ok(())
    }

    async fn list_tasks(
        &self,
        caller: UserId,
        project: Option<ProjectId>,
    ) -> Result<Vec<TaskWithAssignee>, BoardServiceError> {
        match project {
            Some(project) => {
                let project =
                    self.accessible_project(caller, project).await?;

                Ok(self.tasks.list_for_project(project.id).await?)
            }
            None => {
                let workspace_ids =
                    self.memberships.workspace_ids_for_user(caller).await?;

                Ok(self.tasks.list_for_workspaces(&workspace_ids).await?)
            }
        }
    }

    async fn create_task(
        &self,
        caller: UserId,
        request: NewTaskRequest,
    ) -> Result<Task, BoardServiceError> {
        self.accessible_project(caller, request.project_id).await?;

        let task = self
            .tasks
            .create(NewTask::new(
                request.title,
                request.description.unwrap_or_default(),
                request.status.unwrap_or(TaskStatus::Todo),
                request.priority.unwrap_or(TaskPriority::Medium),
                request.due_date,
                request.project_id,
                caller,
            ))
            .await?;

        tracing::info!(
            task = task.id.0,
            project = task.project_id.0,
            "created task"
        );

        Ok(task)
    }

    async fn update_task(
        &self,
        caller: UserId,
        task: TaskId,
        patch: TaskPatch,
    ) -> Result<(), BoardServiceError> {
        let task = self.accessible_task(caller, task).await?;

        let patch = patch.normalized();

        if !self.tasks.update(task.id, &patch).await? {
            return Err(BoardServiceErrorInner::TaskNotFound.into());
        }

        Ok(())
    }

    async fn delete_task(
        &self,
        caller: UserId,
        task: TaskId,
    ) -> Result<(), BoardServiceError> {
        let task = self.accessible_task(caller, task).await?;

        if !self.tasks.delete(task.id).await? {
            return Err(BoardServiceErrorInner::TaskNotFound.into());
        }

        tracing::info!(task = task.id.0, "deleted task");

        Ok(())
    }
}
