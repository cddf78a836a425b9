use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    data::{projects::ProjectId, tasks::TaskWithAssignee},
    extractors::BearerToken,
    routes::api::common::{authenticate, board_error_response},
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/")]
pub struct ListTasksPath;

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Restrict to one project; without it, tasks across every workspace
    /// the caller belongs to are returned.
    #[serde(default, rename = "projectId")]
    pub project_id: Option<i64>,
}

#[utoipa::path(
    get,
    description = "Tasks, newest first, annotated with assignee names",
    path = "/",
    params(ListTasksQuery),
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Tasks", body = Vec<TaskWithAssignee>),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such project"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn list_tasks(
    _: ListTasksPath,
    Query(query): Query<ListTasksQuery>,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let identity = authenticate!(state, token.0);

    match state
        .provider
        .board_service()
        .list_tasks(identity.id, query.project_id.map(ProjectId::new))
        .await
    {
        Ok(tasks) => Json(tasks).into_response(),
        Err(e) => board_error_response(e),
    }
}
