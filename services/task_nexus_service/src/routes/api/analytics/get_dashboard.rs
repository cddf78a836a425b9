use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;

use crate::{
    extractors::BearerToken,
    routes::api::common::{analytics_error_response, authenticate},
    services::DashboardSummary,
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/dashboard")]
pub struct GetDashboardPath;

#[utoipa::path(
    get,
    description = "Task and project totals across the caller's workspaces",
    path = "/dashboard",
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Summary", body = DashboardSummary),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn get_dashboard(
    _: GetDashboardPath,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state.provider.analytics_service().dashboard(identity.id).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => analytics_error_response(e),
    }
}
