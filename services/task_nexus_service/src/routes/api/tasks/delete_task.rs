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
    data::tasks::TaskId,
    extractors::BearerToken,
    routes::api::common::{authenticate, board_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug, IntoParams)]
#[typed_path("/{id}")]
pub struct DeleteTaskPath {
    pub id: i64,
}

#[utoipa::path(
    delete,
    description = "Delete a task",
    path = "/{id}",
    params(DeleteTaskPath),
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Deleted"),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such task"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn delete_task(
    DeleteTaskPath { id }: DeleteTaskPath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .board_service()
        .delete_task(identity.id, TaskId::new(id))
        .await
    {
        Ok(()) => {
            Json(json!({ "message": "Task purged from nexus" }))
                .into_response()
        }
        Err(e) => board_error_response(e),
    }
}
