use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::{
    data::workspaces::WorkspaceId,
    extractors::BearerToken,
    routes::api::common::{authenticate, membership_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug, IntoParams)]
#[typed_path("/{id}")]
pub struct DeleteWorkspacePath {
    pub id: i64,
}

#[utoipa::path(
    delete,
    description = "Delete a workspace and everything in it; owners only",
    path = "/{id}",
    params(DeleteWorkspacePath),
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Deleted"),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not the owner"),
        (status = NOT_FOUND, description = "No such workspace"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn delete_workspace(
    DeleteWorkspacePath { id }: DeleteWorkspacePath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .membership_service()
        .delete_workspace(identity.id, WorkspaceId::new(id))
        .await
    {
        Ok(()) => {
            Json(json!({ "message": "Workspace purged from nexus" }))
                .into_response()
        }
        Err(e) => membership_error_response(e),
    }
}
