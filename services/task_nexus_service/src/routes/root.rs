use axum::{Router, routing::get};
use derive_new::new;

use crate::state::ServiceState;

#[derive(clap::Args, Debug, Clone, new)]
pub struct RouterConfig {
    #[clap(
        long,
        env = "TASK_NEXUS_API_PREFIX",
        help = "Prefix the REST API is served under, defaults to /api"
    )]
    pub api_prefix: Option<String>,

    #[clap(
        long,
        default_value = "true",
        action = clap::ArgAction::Set,
        env = "TASK_NEXUS_SERVE_DOCS",
        help = "Whether to serve the OpenAPI document"
    )]
    pub serve_docs: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            api_prefix: Some("/api".to_string()),
            serve_docs: true,
        }
    }
}

pub fn build_router(config: &RouterConfig) -> Router<ServiceState> {
    let api_prefix = config.api_prefix.as_deref().unwrap_or("/api");

    let mut router = Router::new()
        .route("/", get(index))
        .nest(api_prefix, super::api::build_router());

    if config.serve_docs {
        router = router.nest("/openapi", super::open_api::build_router());
    }

    router
}

async fn index() -> &'static str {
    "task-nexus core active"
}
