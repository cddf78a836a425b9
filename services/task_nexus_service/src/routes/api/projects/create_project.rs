use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    data::{projects::ProjectWithCounts, workspaces::WorkspaceId},
    extractors::BearerToken,
    response::problem::validation_response,
    routes::api::common::{authenticate, board_error_response},
    services::NewProjectRequest,
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/")]
pub struct CreateProjectPath;

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateProjectBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, rename = "workspaceId")]
    pub workspace_id: Option<i64>,
}

#[utoipa::path(
    post,
    description = "Create a project inside a workspace the caller belongs to",
    path = "/",
    request_body = CreateProjectBody,
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Created, with zeroed counts", body = ProjectWithCounts),
        (status = BAD_REQUEST, description = "Missing required field"),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such workspace"),
    )
)]
#[tracing::instrument(skip(state, token, body))]
pub async fn create_project(
    _: CreateProjectPath,
    State(state): State<ServiceState>,
    token: BearerToken,
    Json(body): Json<CreateProjectBody>,
) -> Response {
    let identity = authenticate!(state, token.0);

    let (Some(name), Some(workspace_id)) = (body.name, body.workspace_id)
    else {
        return validation_response("Name and workspaceId are required");
    };

    match state
        .provider
        .board_service()
        .create_project(
            identity.id,
            NewProjectRequest::new(
                name,
                body.description,
                body.color,
                WorkspaceId::new(workspace_id),
            ),
        )
        .await
    {
        Ok(project) => Json(project).into_response(),
        Err(e) => board_error_response(e),
    }
}
