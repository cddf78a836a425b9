use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    response::problem::validation_response,
    routes::api::common::registration_error_response,
    services::AuthenticatedUser,
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/login")]
pub struct LoginPath;

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[utoipa::path(
    post,
    description = "Exchange credentials for a bearer token",
    path = "/login",
    request_body = LoginBody,
    responses(
        (status = OK, description = "Authenticated", body = AuthenticatedUser),
        (status = BAD_REQUEST, description = "Missing required field"),
        (status = UNAUTHORIZED, description = "Unknown account or wrong password"),
    )
)]
#[tracing::instrument(skip(state, body))]
pub async fn login(
    _: LoginPath,
    State(state): State<ServiceState>,
    Json(body): Json<LoginBody>,
) -> Response {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return validation_response("Email and password are required");
    };

    match state
        .provider
        .registration_service()
        .login(&email, &password)
        .await
    {
        Ok(authenticated) => Json(authenticated).into_response(),
        Err(e) => registration_error_response(e),
    }
}
