use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;

/// problem+json-shaped failure body shared by every error path.
pub fn problem_response(
    status: StatusCode,
    title: &str,
    detail: &str,
) -> Response {
    (
        status,
        Json(json!({
            "type": format!("https://httpstatuses.com/{}", status.as_u16()),
            "title": title,
            "detail": detail,
            "status": status.as_u16(),
            "instance": "",
        })),
    )
        .into_response()
}

pub fn validation_response(detail: &str) -> Response {
    problem_response(StatusCode::BAD_REQUEST, "Validation Error", detail)
}

pub fn unauthorized_response(detail: &str) -> Response {
    problem_response(StatusCode::UNAUTHORIZED, "Unauthorized", detail)
}

pub fn forbidden_response(detail: &str) -> Response {
    problem_response(StatusCode::FORBIDDEN, "Forbidden", detail)
}

pub fn not_found_response(detail: &str) -> Response {
    problem_response(StatusCode::NOT_FOUND, "Not Found", detail)
}

pub fn conflict_response(detail: &str) -> Response {
    problem_response(StatusCode::CONFLICT, "Conflict", detail)
}

pub fn internal_error_response(detail: &str) -> Response {
    problem_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        detail,
    )
}
