use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    data::{memberships::MemberProfile, workspaces::WorkspaceId},
    extractors::BearerToken,
    routes::api::common::{authenticate, membership_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug, IntoParams)]
#[typed_path("/{id}/members")]
pub struct ListMembersPath {
    pub id: i64,
}

#[utoipa::path(
    get,
    description = "Members of a workspace the caller belongs to",
    path = "/{id}/members",
    params(ListMembersPath),
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Members with roles", body = Vec<MemberProfile>),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such workspace"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn list_members(
    ListMembersPath { id }: ListMembersPath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .membership_service()
        .list_members(identity.id, WorkspaceId::new(id))
        .await
    {
        Ok(members) => Json(members).into_response(),
        Err(e) => membership_error_response(e),
    }
}
