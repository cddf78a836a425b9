use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;

use crate::{
    data::users::PublicUser,
    extractors::BearerToken,
    routes::api::common::{authenticate, registration_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/me")]
pub struct MePath;

#[utoipa::path(
    get,
    description = "The account behind the presented token",
    path = "/me",
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Current user", body = PublicUser),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn me(
    _: MePath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .registration_service()
        .current_user(&identity)
        .await
    {
        Ok(user) => Json(user).into_response(),
        Err(e) => registration_error_response(e),
    }
}
