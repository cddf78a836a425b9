use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, IntoDiscriminant as _};

use crate::data::users::UserId;

/// Identity carried by a bearer token. Encodes the public projection of the
/// user at signing time; `currentUser` re-resolves it against the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, new)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

pub trait TokenService: Send + Sync + 'static {
    fn sign(&self, identity: &Identity)
    -> Result<String, SecurityServiceError>;

    /// Stateless verification. Malformed, unsigned or tampered tokens yield
    /// `None`, never an error.
    fn verify(&self, token: &str) -> Option<Identity>;
}

pub type DynTokenService = Box<dyn TokenService>;

pub trait CredentialHasher: Send + Sync + 'static {
    /// One-way salted hash of the password, as a self-describing string.
    fn hash(&self, password: &str) -> Result<String, SecurityServiceError>;

    /// Constant-time verification of `password` against a stored hash.
    fn verify(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, SecurityServiceError>;
}

pub type DynCredentialHasher = Box<dyn CredentialHasher>;

#[derive(Debug, thiserror::Error)]
#[error("security service error: {inner}")]
pub struct SecurityServiceError {
    inner: SecurityServiceErrorInner,
    kind: SecurityServiceErrorKind,
}

impl SecurityServiceError {
    pub fn custom(inner: impl Into<eyre::Report>) -> Self {
        let inner = inner.into();
        Self {
            kind: SecurityServiceErrorKind::Custom,
            inner: inner.into(),
        }
    }

    #[allow(unused)]
    pub fn kind(&self) -> SecurityServiceErrorKind {
        self.kind
    }
}

impl<T: Into<SecurityServiceErrorInner>> From<T> for SecurityServiceError {
    fn from(inner: T) -> Self {
        let inner = inner.into();
        Self {
            kind: inner.discriminant(),
            inner,
        }
    }
}

#[derive(Debug, EnumDiscriminants, thiserror::Error)]
#[strum_discriminants(vis(pub), name(SecurityServiceErrorKind))]
pub enum SecurityServiceErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),
}
