use std::collections::BTreeMap;

use axum::{Json, Router, extract::State, response::IntoResponse};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::{
    OpenApi as _,
    openapi::{OpenApi, PathItem},
};

use crate::{
    response::yaml::Yaml, routes::api::ApiDoc, state::ServiceState,
};

pub fn build_router() -> Router<ServiceState> {
    Router::new().typed_get(get_open_api_doc)
}

#[derive(TypedPath, Serialize, Deserialize, Debug)]
#[typed_path("/{format}")]
pub struct GetOpenApiDocPath {
    format: Format,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    #[strum(serialize = "json")]
    Json,
    #[strum(serialize = "yaml")]
    Yaml,
}

fn apply(api_prefix: &str, mut openapi: OpenApi) -> OpenApi {
    openapi.paths.paths = openapi
        .paths
        .paths
        .iter()
        .map(|(k, v)| (format!("{api_prefix}{k}"), v.clone()))
        .collect::<BTreeMap<String, PathItem>>();

    openapi
}

#[tracing::instrument(skip(state))]
pub async fn get_open_api_doc(
    GetOpenApiDocPath { format }: GetOpenApiDocPath,
    State(state): State<ServiceState>,
) -> axum::response::Response {
    let api_prefix = state.routes.api_prefix.as_deref().unwrap_or("/api");

    match format {
        Format::Json => {
            Json(apply(api_prefix, ApiDoc::openapi())).into_response()
        }
        Format::Yaml => {
            Yaml(apply(api_prefix, ApiDoc::openapi())).into_response()
        }
    }
}
