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
    data::tasks::{TaskId, TaskPatch},
    extractors::BearerToken,
    routes::api::common::{authenticate, board_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug, IntoParams)]
#[typed_path("/{id}")]
pub struct UpdateTaskPath {
    pub id: i64,
}

/// Sparse patch: absent fields stay untouched, null fields clear. Setting
/// `completed` forces the status to done regardless of a status in the
/// same payload; setting status to done on its own does not mark the task
/// completed.
#[utoipa::path(
    put,
    description = "Apply a sparse update to a task",
    path = "/{id}",
    params(UpdateTaskPath),
    request_body = TaskPatch,
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Updated"),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such task"),
    )
)]
#[tracing::instrument(skip(state, token, patch))]
pub async fn update_task(
    UpdateTaskPath { id }: UpdateTaskPath,
    State(state): State<ServiceState>,
    token: BearerToken,
    Json(patch): Json<TaskPatch>,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .board_service()
        .update_task(identity.id, TaskId::new(id), patch)
        .await
    {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => board_error_response(e),
    }
}
