use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::response::problem::internal_error_response;

#[derive(Serialize, Deserialize)]
pub struct Yaml<T>(pub T);

impl<T: Serialize> IntoResponse for Yaml<T> {
    fn into_response(self) -> axum::response::Response {
        let yaml = serde_norway::to_string(&self.0);

        match yaml {
            Ok(d) => (
                axum::http::StatusCode::OK,
                [(axum::http::header::CONTENT_TYPE, "application/yaml")],
                d,
            )
                .into_response(),
            Err(e) => internal_error_response(&e.to_string()),
        }
    }
}
