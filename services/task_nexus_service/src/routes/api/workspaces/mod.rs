mod create_workspace;
mod delete_workspace;
mod get_workspace;
mod invite_member;
mod list_members;
mod list_workspaces;

pub use create_workspace::*;
pub use delete_workspace::*;
pub use get_workspace::*;
pub use invite_member::*;
pub use list_members::*;
pub use list_workspaces::*;

use axum::Router;
use axum_extra::routing::RouterExt;
use utoipa::OpenApi;

use crate::state::ServiceState;

pub fn build_router() -> Router<ServiceState> {
    Router::new()
        .typed_get(list_workspaces)
        .typed_post(create_workspace)
        .typed_get(get_workspace)
        .typed_delete(delete_workspace)
        .typed_post(invite_member)
        .typed_get(list_members)
}

#[derive(OpenApi)]
#[openapi(paths(
    list_workspaces,
    create_workspace,
    get_workspace,
    delete_workspace,
    invite_member,
    list_members,
))]
pub struct WorkspacesApiDoc;
