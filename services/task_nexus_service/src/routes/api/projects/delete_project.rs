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
    data::projects::ProjectId,
    extractors::BearerToken,
    routes::api::common::{authenticate, board_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug, IntoParams)]
#[typed_path("/{id}")]
pub struct DeleteProjectPath {
    pub id: i64,
}

#[utoipa::path(
    delete,
    description = "Delete a project and its tasks",
    path = "/{id}",
    params(DeleteProjectPath),
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Deleted"),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such project"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn delete_project(
    DeleteProjectPath { id }: DeleteProjectPath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .board_service()
        .delete_project(identity.id, ProjectId::new(id))
        .await
    {
        Ok(()) => Json(json!({ "message": "Project purged" })).into_response(),
        Err(e) => board_error_response(e),
    }
}
