mod login;
mod me;
mod register;

pub use login::*;
pub use me::*;
pub use register::*;

use axum::Router;
use axum_extra::routing::RouterExt;
use utoipa::OpenApi;

use crate::state::ServiceState;

pub fn build_router() -> Router<ServiceState> {
    Router::new()
        .typed_post(register)
        .typed_post(login)
        .typed_get(me)
}

#[derive(OpenApi)]
#[openapi(paths(register, login, me))]
pub struct AuthApiDoc;
