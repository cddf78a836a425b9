use axum::response::Response;

use crate::{
    response::problem::{
        conflict_response, forbidden_response, internal_error_response,
        not_found_response, unauthorized_response,
    },
    services::{
        AnalyticsServiceError, BoardServiceError, BoardServiceErrorKind,
        MembershipServiceError, MembershipServiceErrorKind,
        RegistrationServiceError, RegistrationServiceErrorKind,
    },
};

/// Verifies the bearer credential against the token service, evaluating to
/// the caller identity or returning 401 out of the surrounding handler.
macro_rules! authenticate {
    ($state:expr, $token:expr) => {
        match $state.provider.token_service().verify(&$token) {
            Some(identity) => identity,
            None => {
                return $crate::response::problem::unauthorized_response(
                    "Invalid token",
                );
            }
        }
    };
}

pub(crate) use authenticate;

pub fn registration_error_response(
    err: RegistrationServiceError,
) -> Response {
    use RegistrationServiceErrorKind as Kind;

    let detail = err.to_string();

    match err.kind() {
        Kind::IdentityTaken => conflict_response(&detail),
        Kind::NoAccount | Kind::WrongPassword | Kind::UnknownIdentity => {
            unauthorized_response(&detail)
        }
        _ => {
            tracing::error!("registration failure: {err}");
            internal_error_response("Unexpected failure")
        }
    }
}

pub fn membership_error_response(err: MembershipServiceError) -> Response {
    use MembershipServiceErrorKind as Kind;

    let detail = err.to_string();

    match err.kind() {
        Kind::WorkspaceNotFound | Kind::UserNotFound => {
            not_found_response(&detail)
        }
        Kind::NotAMember | Kind::CannotInvite | Kind::NotOwner => {
            forbidden_response(&detail)
        }
        Kind::AlreadyMember => conflict_response(&detail),
        _ => {
            tracing::error!("membership failure: {err}");
            internal_error_response("Unexpected failure")
        }
    }
}

pub fn board_error_response(err: BoardServiceError) -> Response {
    use BoardServiceErrorKind as Kind;

    let detail = err.to_string();

    match err.kind() {
        Kind::WorkspaceNotFound
        | Kind::ProjectNotFound
        | Kind::TaskNotFound => not_found_response(&detail),
        Kind::NotAMember => forbidden_response(&detail),
        _ => {
            tracing::error!("board failure: {err}");
            internal_error_response("Unexpected failure")
        }
    }
}

pub fn analytics_error_response(err: AnalyticsServiceError) -> Response {
    tracing::error!("analytics failure: {err}");

    internal_error_response("Analytics failed")
}
