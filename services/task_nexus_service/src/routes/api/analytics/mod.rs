mod get_dashboard;

pub use get_dashboard::*;

use axum::Router;
use axum_extra::routing::RouterExt;
use utoipa::OpenApi;

use crate::state::ServiceState;

pub fn build_router() -> Router<ServiceState> {
    Router::new().typed_get(get_dashboard)
}

#[derive(OpenApi)]
#[openapi(paths(get_dashboard))]
pub struct AnalyticsApiDoc;
