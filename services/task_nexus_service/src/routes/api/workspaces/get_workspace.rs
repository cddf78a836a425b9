use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    data::workspaces::{Workspace, WorkspaceId},
    extractors::BearerToken,
    routes::api::common::{authenticate, membership_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug, IntoParams)]
#[typed_path("/{id}")]
pub struct GetWorkspacePath {
    pub id: i64,
}

#[utoipa::path(
    get,
    description = "Fetch one workspace the caller belongs to",
    path = "/{id}",
    params(GetWorkspacePath),
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Workspace", body = Workspace),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such workspace"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn get_workspace(
    GetWorkspacePath { id }: GetWorkspacePath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .membership_service()
        .get_workspace(identity.id, WorkspaceId::new(id))
        .await
    {
        Ok(workspace) => Json(workspace).into_response(),
        Err(e) => membership_error_response(e),
    }
}
