mod create_project;
mod delete_project;
mod get_project;
mod list_workspace_projects;

pub use create_project::*;
pub use delete_project::*;
pub use get_project::*;
pub use list_workspace_projects::*;

use axum::Router;
use axum_extra::routing::RouterExt;
use utoipa::OpenApi;

use crate::state::ServiceState;

pub fn build_router() -> Router<ServiceState> {
    Router::new()
        .typed_get(list_workspace_projects)
        .typed_get(get_project)
        .typed_post(create_project)
        .typed_delete(delete_project)
}

#[derive(OpenApi)]
#[openapi(paths(
    list_workspace_projects,
    get_project,
    create_project,
    delete_project,
))]
pub struct ProjectsApiDoc;
