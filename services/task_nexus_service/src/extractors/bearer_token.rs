use axum::{
    Json,
    extract::FromRequestParts,
    response::{IntoResponse, Response},
};
use http::{StatusCode, request::Parts};
use serde_json::json;

/// Raw bearer credential from the `Authorization` header. This extractor
/// only peels the header; verification happens against service state in
/// the handler.
pub struct BearerToken(pub String);

pub enum BearerTokenRejection {
    NoToken,
    MalformedHeader(String),
}

impl IntoResponse for BearerTokenRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            match self {
                BearerTokenRejection::NoToken => Json(json!({
                    "type": "https://httpstatuses.com/401",
                    "title": "No Token Provided",
                    "detail": "No token provided",
                    "status": StatusCode::UNAUTHORIZED.as_u16(),
                    "instance": "",
                })),
                BearerTokenRejection::MalformedHeader(e) => Json(json!({
                    "type": "https://httpstatuses.com/401",
                    "title": "Malformed Authorization Header",
                    "detail": format!("Can't parse authorization header: {}", e),
                    "status": StatusCode::UNAUTHORIZED.as_u16(),
                    "instance": "",
                })),
            },
        )
            .into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    /// The rejection type.
    /// This is the type that is returned when the extractor fails.
    type Rejection = BearerTokenRejection;

    /// Perform the extraction.
    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .ok_or(BearerTokenRejection::NoToken)?;

        let value = header.to_str().map_err(|e| {
            BearerTokenRejection::MalformedHeader(e.to_string())
        })?;

        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "))
            .ok_or_else(|| {
                BearerTokenRejection::MalformedHeader(
                    "expected a bearer credential".to_string(),
                )
            })?;

        Ok(BearerToken(token.trim().to_string()))
    }
}
