use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    data::memberships::JoinedWorkspace,
    extractors::BearerToken,
    response::problem::validation_response,
    routes::api::common::{authenticate, membership_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/")]
pub struct CreateWorkspacePath;

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateWorkspaceBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[utoipa::path(
    post,
    description = "Create a workspace owned by the caller",
    path = "/",
    request_body = CreateWorkspaceBody,
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Created", body = JoinedWorkspace),
        (status = BAD_REQUEST, description = "Missing required field"),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
    )
)]
#[tracing::instrument(skip(state, token, body))]
pub async fn create_workspace(
    _: CreateWorkspacePath,
    State(state): State<ServiceState>,
    token: BearerToken,
    Json(body): Json<CreateWorkspaceBody>,
) -> Response {
    let identity = authenticate!(state, token.0);

    let Some(name) = body.name else {
        return validation_response("Name is required");
    };

    match state
        .provider
        .membership_service()
        .create_workspace(
            identity.id,
            &name,
            body.description.as_deref().unwrap_or_default(),
        )
        .await
    {
        Ok(workspace) => Json(workspace).into_response(),
        Err(e) => membership_error_response(e),
    }
}
