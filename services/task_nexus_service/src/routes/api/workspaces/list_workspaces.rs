use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;

use crate::{
    data::memberships::JoinedWorkspace,
    extractors::BearerToken,
    routes::api::common::{authenticate, membership_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/")]
pub struct ListWorkspacesPath;

#[utoipa::path(
    get,
    description = "The caller's workspaces, most recently joined first",
    path = "/",
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Workspaces with the caller's role", body = Vec<JoinedWorkspace>),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn list_workspaces(
    _: ListWorkspacesPath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .membership_service()
        .list_workspaces(identity.id)
        .await
    {
        Ok(workspaces) => Json(workspaces).into_response(),
        Err(e) => membership_error_response(e),
    }
}
