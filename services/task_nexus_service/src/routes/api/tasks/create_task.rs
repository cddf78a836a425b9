use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{
    data::{
        projects::ProjectId,
        tasks::{Task, TaskPriority, TaskStatus},
    },
    extractors::BearerToken,
    response::problem::validation_response,
    routes::api::common::{authenticate, board_error_response},
    services::NewTaskRequest,
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/")]
pub struct CreateTaskPath;

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateTaskBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>)]
    pub due_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub project_id: Option<i64>,
}

#[utoipa::path(
    post,
    description = "Create a task; defaults to todo status and medium priority",
    path = "/",
    request_body = CreateTaskBody,
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Created", body = Task),
        (status = BAD_REQUEST, description = "Missing required field"),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
        (status = FORBIDDEN, description = "Caller is not a member"),
        (status = NOT_FOUND, description = "No such project"),
    )
)]
#[tracing::instrument(skip(state, token, body))]
pub async fn create_task(
    _: CreateTaskPath,
    State(state): State<ServiceState>,
    token: BearerToken,
    Json(body): Json<CreateTaskBody>,
) -> Response {
    let identity = authenticate!(state, token.0);

    let (Some(title), Some(project_id)) = (body.title, body.project_id)
    else {
        return validation_response("Title and project_id are required");
    };

    match state
        .provider
        .board_service()
        .create_task(
            identity.id,
            NewTaskRequest::new(
                title,
                body.description,
                body.status,
                body.priority,
                body.due_date,
                ProjectId::new(project_id),
            ),
        )
        .await
    {
        Ok(task) => Json(task).into_response(),
        Err(e) => board_error_response(e),
    }
}
