use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::routing::TypedPath;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    data::users::PublicUser, extractors::BearerToken,
    routes::api::common::authenticate, state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/search")]
pub struct SearchUsersPath;

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchUsersQuery {
    /// Partial email to match, case-insensitively. Under three characters
    /// the search returns nothing.
    #[serde(default)]
    pub email: Option<String>,
}

/// Matches are not filtered against any workspace's member list; excluding
/// existing members is up to the caller.
#[utoipa::path(
    get,
    description = "Look up users by partial email",
    path = "/search",
    params(SearchUsersQuery),
    security(("bearer_token" = [])),
    responses(
        (status = OK, description = "Matches", body = Vec<PublicUser>),
        (status = UNAUTHORIZED, description = "Missing or invalid token"),
    )
)]
#[tracing::instrument(skip(state, token))]
pub async fn search_users(
    _: SearchUsersPath,
    Query(query): Query<SearchUsersQuery>,
    State(state): State<ServiceState>,
    token: BearerToken,
) -> Response {
    let _identity = authenticate!(state, token.0);

    let results = match &query.email {
        Some(email) => {
            state.provider.directory_service().search_users(email).await
        }
        None => Vec::new(),
    };

    Json(results).into_response()
}
