use async_trait::async_trait;
use derive_new::new;
use strum::{EnumDiscriminants, IntoDiscriminant};

use crate::data::{
    projects::Project,
    users::{NewUser, User, UserId},
    workspaces::Workspace,
};

/// Names of the entities bootstrapped next to a fresh user.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct BootstrapDefaults {
    pub workspace_name: String,
    pub workspace_description: String,
    pub project_name: String,
    pub project_description: String,
}

/// The registration bundle: the user plus the default workspace and starter
/// project created alongside it. The owner membership binding the two is
/// created as well but carries no information the caller needs back.
#[derive(Debug, Clone, PartialEq, new)]
pub struct RegisteredUser {
    pub user: User,
    pub workspace: Workspace,
    pub project: Project,
}

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Creates the user together with its default workspace, owner
    /// membership and starter project as one storage-level transaction, so
    /// a failure partway through never leaves an orphaned user behind.
    async fn create_with_defaults(
        &self,
        user: NewUser,
        defaults: &BootstrapDefaults,
    ) -> Result<RegisteredUser, UserRepositoryError>;

    async fn find_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Case-insensitive substring match on email, capped at `limit` rows.
    async fn search_by_email(
        &self,
        fragment: &str,
        limit: u32,
    ) -> Result<Vec<User>, UserRepositoryError>;
}

pub type DynUserRepository = Box<dyn UserRepository>;

#[derive(Debug, thiserror::Error)]
#[error("user repository error: {inner}")]
pub struct UserRepositoryError {
    inner: UserRepositoryErrorInner,
    kind: UserRepositoryErrorKind,
}

impl UserRepositoryError {
    pub fn kind(&self) -> UserRepositoryErrorKind {
        self.kind
    }
}

impl<T: Into<UserRepositoryErrorInner>> From<T> for UserRepositoryError {
    fn from(inner: T) -> Self {
        let inner = inner.into();
        Self {
            kind: inner.discriminant(),
            inner,
        }
    }
}

#[derive(Debug, EnumDiscriminants, thiserror::Error)]
#[strum_discriminants(vis(pub), name(UserRepositoryErrorKind))]
pub enum UserRepositoryErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),

    #[error("Username or email already exists")]
    IdentityTaken,
}
