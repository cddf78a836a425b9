use async_trait::async_trait;
use derive_new::new;

use crate::{
    data::users::{
        BootstrapDefaults, DynUserRepository, NewUser, PublicUser,
        UserRepositoryErrorKind,
    },
    security::{DynCredentialHasher, DynTokenService, Identity},
    services::{
        AuthenticatedUser, RegistrationRequest, RegistrationService,
        RegistrationServiceError, RegistrationServiceErrorInner,
    },
};

const DEFAULT_WORKSPACE_DESCRIPTION: &str = "Default workspace";
const STARTER_PROJECT_NAME: &str = "My First Project";
const STARTER_PROJECT_DESCRIPTION: &str = "Default project";

#[derive(new)]
pub struct DefaultRegistrationService {
    users: DynUserRepository,
    tokens: DynTokenService,
    hasher: DynCredentialHasher,
}

impl DefaultRegistrationService {
    fn issue(
        &self,
        user: PublicUser,
    ) -> Result<AuthenticatedUser, RegistrationServiceError> {
        let identity = Identity::new(
            user.id,
            user.username.clone(),
            user.email.clone(),
        );
        let token = self.tokens.sign(&identity)?;

        Ok(AuthenticatedUser::new(token, user))
    }
}

#[async_trait]
impl RegistrationService for DefaultRegistrationService {
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<AuthenticatedUser, RegistrationServiceError> {
        let password_hash = self.hasher.hash(&request.password)?;

        let defaults = BootstrapDefaults::new(
            format!("{} Workspace", request.username),
            DEFAULT_WORKSPACE_DESCRIPTION.to_string(),
            STARTER_PROJECT_NAME.to_string(),
            STARTER_PROJECT_DESCRIPTION.to_string(),
        );

        let registered = self
            .users
            .create_with_defaults(
                NewUser::new(request.username, request.email, password_hash),
                &defaults,
            )
            .await
            .map_err(|e| match e.kind() {
                UserRepositoryErrorKind::IdentityTaken => {
                    RegistrationServiceErrorInner::IdentityTaken.into()
                }
                _ => RegistrationServiceError::from(
                    RegistrationServiceErrorInner::UserRepository(e),
                ),
            })?;

        tracing::info!(
            user = %registered.user.username,
            workspace = registered.workspace.id.0,
            "registered new account"
        );

        self.issue(registered.user.to_public())
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, RegistrationServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(RegistrationServiceErrorInner::NoAccount)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(RegistrationServiceErrorInner::WrongPassword.into());
        }

        self.issue(user.to_public())
    }

    async fn current_user(
        &self,
        identity: &Identity,
    ) -> Result<PublicUser, RegistrationServiceError> {
        let user = self
            .users
            .find_by_id(identity.id)
            .await?
            .ok_or(RegistrationServiceErrorInner::UnknownIdentity)?;

        Ok(user.to_public())
    }
}
