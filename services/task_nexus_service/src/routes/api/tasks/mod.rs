mod create_task;
mod delete_task;
mod list_tasks;
mod update_task;

pub use create_task::*;
pub use delete_task::*;
pub use list_tasks::*;
pub use update_task::*;

use axum::Router;
use axum_extra::routing::RouterExt;
use utoipa::OpenApi;

use crate::state::ServiceState;

pub fn build_router() -> Router<ServiceState> {
    Router::new()
        .typed_get(list_tasks)
        .typed_post(create_task)
        .typed_put(update_task)
        .typed_delete(delete_task)
}

#[derive(OpenApi)]
#[openapi(paths(list_tasks, create_task, update_task, delete_task))]
pub struct TasksApiDoc;
