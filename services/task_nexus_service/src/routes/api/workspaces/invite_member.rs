use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::{
    data::workspaces::WorkspaceId,
    extractors::BearerToken,
    response::problem::validation_response,
    routes::api::common::{authenticate, membership_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug, IntoParams)]
#[typed_path("/{id}/invite")]
pub struct InviteMemberPath {
    pub id: i64,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct InviteMemberBody {
    #[serde(default)]
    pub email: Option<String>,
}

#[utoipa::path(
    post,
    description = "Invite a registered user into the workspace as a member",
    path = "/{id}/invite",
    params(InviteMemberPath),
    request_body = InviteMemberBody,
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Invited"),
        (status = BAD_REQUEST, description = "Missing required field"),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller may not invite here"),
        (status = NOT_FOUND, description = "Workspace or invitee not found"),
        (status = CONFLICT, description = "Invitee is already a member"),
    )
)]
#[tracing::instrument(skip(state, token, body))]
pub async fn invite_member(
    InviteMemberPath { id }: InviteMemberPath,
    State(state): State<ServiceState>,
    token: BearerToken,
    Json(body): Json<InviteMemberBody>,
) -> Response {
    let identity = authenticate!(state, token.0);

    let Some(email) = body.email else {
        return validation_response("Email is required");
    };

    match state
        .provider
        .membership_service()
        .invite(identity.id, WorkspaceId::new(id), &email)
        .await
    {
        Ok(()) => Json(json!({
            "success": true,
            "message": "User invited successfully",
        }))
        .into_response(),
        Err(e) => membership_error_response(e),
    }
}
