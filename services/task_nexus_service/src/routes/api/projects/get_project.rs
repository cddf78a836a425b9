use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    data::projects::{Project, ProjectId},
    extractors::BearerToken,
    routes::api::common::{authenticate, board_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug, IntoParams)]
#[typed_path("/{id}")]
pub struct GetProjectPath {
    pub id: i64,
}

#[utoipa::path(
    get,
    description = "Fetch one project from a workspace the caller belongs to",
    path = "/{id}",
    params(GetProjectPath),
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Project", body = Project),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such project"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn get_project(
    GetProjectPath { id }: GetProjectPath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .board_service()
        .get_project(identity.id, ProjectId::new(id))
        .await
    {
        Ok(project) => Json(project).into_response(),
        Err(e) => board_error_response(e),
    }
}
