use async_trait::async_trait;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, IntoDiscriminant};
use utoipa::ToSchema;

use crate::{
    data::users::{PublicUser, UserRepositoryError},
    security::{Identity, SecurityServiceError},
};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A freshly issued bearer token plus the public projection of its user.
#[derive(
    Serialize, Deserialize, Debug, Clone, PartialEq, Eq, new, ToSchema,
)]
pub struct AuthenticatedUser {
    pub token: String,
    pub user: PublicUser,
}

#[async_trait]
pub trait RegistrationService: Send + Sync + 'static {
    /// Registers a user and bootstraps their default workspace, owner
    /// membership and starter project as one atomic unit.
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<AuthenticatedUser, RegistrationServiceError>;

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, RegistrationServiceError>;

    /// Re-resolves a verified identity against the user store, so renamed
    /// or removed accounts are reflected rather than echoed from the token.
    async fn current_user(
        &self,
        identity: &Identity,
    ) -> Result<PublicUser, RegistrationServiceError>;
}

pub type DynRegistrationService = Box<dyn RegistrationService>;

#[derive(Debug, thiserror::Error)]
#[error("{inner}")]
pub struct RegistrationServiceError {
    inner: RegistrationServiceErrorInner,
    kind: RegistrationServiceErrorKind,
}

impl RegistrationServiceError {
    pub fn kind(&self) -> RegistrationServiceErrorKind {
        self.kind
    }
}

impl<T: Into<RegistrationServiceErrorInner>> From<T>
    for RegistrationServiceError
{
    fn from(inner: T) -> Self {
        let inner = inner.into();
        Self {
            kind: inner.discriminant(),
            inner,
        }
    }
}

#[derive(Debug, EnumDiscriminants, thiserror::Error)]
#[strum_discriminants(vis(pub), name(RegistrationServiceErrorKind))]
pub enum RegistrationServiceErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),

    #[error("Username or email already exists")]
    IdentityTaken,

    #[error("No account found with this email")]
    NoAccount,

    #[error("Wrong password")]
    WrongPassword,

    #[error("Invalid token")]
    UnknownIdentity,

    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),

    #[error(transparent)]
    Security(#[from] SecurityServiceError),
}
