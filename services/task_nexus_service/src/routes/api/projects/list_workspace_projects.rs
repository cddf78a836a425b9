use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    data::{projects::ProjectWithCounts, workspaces::WorkspaceId},
    extractors::BearerToken,
    routes::api::common::{authenticate, board_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug, IntoParams)]
#[typed_path("/workspace/{workspace_id}")]
pub struct ListWorkspaceProjectsPath {
    pub workspace_id: i64,
}

#[utoipa::path(
    get,
    description = "Projects of a workspace, newest first, with task counts",
    path = "/workspace/{workspace_id}",
    params(ListWorkspaceProjectsPath),
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Projects", body = Vec<ProjectWithCounts>),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such workspace"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn list_workspace_projects(
    ListWorkspaceProjectsPath { workspace_id }: ListWorkspaceProjectsPath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .board_service()
        .list_projects(identity.id, WorkspaceId::new(workspace_id))
        .await
    {
        Ok(projects) => Json(projects).into_response(),
        Err(e) => board_error_response(e),
    }
}
