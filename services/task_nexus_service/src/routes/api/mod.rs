pub mod analytics;
pub mod auth;
pub mod common;
pub mod projects;
pub mod tasks;
pub mod users;
pub mod workspaces;

use axum::Router;
use utoipa::{Modify, OpenApi, openapi};

use crate::state::ServiceState;

pub fn build_router() -> Router<ServiceState> {
    Router::new()
        .nest("/auth", auth::build_router())
        .nest("/users", users::build_router())
        .nest("/workspaces", workspaces::build_router())
        .nest("/projects", projects::build_router())
        .nest("/tasks", tasks::build_router())
        .nest("/analytics", analytics::build_router())
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "task-nexus-service",
        description = "Workspace/project/task collaboration API",
    ),
    nest(
        (path = "/auth", api = auth::AuthApiDoc),
        (path = "/users", api = users::UsersApiDoc),
        (path = "/workspaces", api = workspaces::WorkspacesApiDoc),
        (path = "/projects", api = projects::ProjectsApiDoc),
        (path = "/tasks", api = tasks::TasksApiDoc),
        (path = "/analytics", api = analytics::AnalyticsApiDoc),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components =
            openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_token",
            openapi::security::SecurityScheme::Http(
                openapi::security::HttpBuilder::new()
                    .scheme(openapi::security::HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
