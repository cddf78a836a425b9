mod search_users;

pub use search_users::*;

use axum::Router;
use axum_extra::routing::RouterExt;
use utoipa::OpenApi;

use crate::state::ServiceState;

pub fn build_router() -> Router<ServiceState> {
    Router::new().typed_get(search_users)
}

#[derive(OpenApi)]
#[openapi(paths(search_users))]
pub struct UsersApiDoc;
