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
    services::{AuthenticatedUser, RegistrationRequest},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/register")]
pub struct RegisterPath;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterBody {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[utoipa::path(
    post,
    description = "Register an account with its default workspace",
    path = "/register",
    request_body = RegisterBody,
    responses(
        (status = OK, description = "Registered", body = AuthenticatedUser),
        (status = BAD_REQUEST, description = "Missing required field"),
        (status = CONFLICT, description = "Username or email already exists"),
    )
)]
#[tracing::instrument(skip(state, body))]
pub async fn register(
    _: RegisterPath,
    State(state): State<ServiceState>,
    Json(body): Json<RegisterBody>,
) -> Response {
    let (Some(username), Some(email), Some(password)) =
        (body.username, body.email, body.password)
    else {
        return validation_response(
            "Username, email and password are required",
        );
    };

    match state
        .provider
        .registration_service()
        .register(RegistrationRequest::new(username, email, password))
        .await
    {
        Ok(authenticated) => Json(authenticated).into_response(),
        Err(e) => registration_error_response(e),
    }
}
