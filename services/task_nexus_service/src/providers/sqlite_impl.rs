use std::sync::Arc;

use derive_new::new;
use sqlx::SqlitePool;

use crate::{
    config::Configuration,
    data::{
        memberships::DynMembershipRepository,
        projects::DynProjectRepository, tasks::DynTaskRepository,
        users::DynUserRepository, workspaces::DynWorkspaceRepository,
    },
    data_impl::sqlite::{
        SqliteMembershipRepository, SqliteProjectRepository,
        SqliteTaskRepository, SqliteUserRepository,
        SqliteWorkspaceRepository,
    },
    providers::DependencyProvider,
    security::{
        Argon2CredentialHasher, DynCredentialHasher, DynTokenService,
        JwtTokenService,
    },
    services::{
        DefaultAnalyticsService, DefaultBoardService,
        DefaultDirectoryService, DefaultMembershipService,
        DefaultRegistrationService, DynAnalyticsService, DynBoardService,
        DynDirectoryService, DynMembershipService, DynRegistrationService,
    },
};

#[derive(Clone, new)]
pub struct SqliteDependencyProvider {
    pool: SqlitePool,
    config: Arc<Configuration>,
}

impl DependencyProvider for SqliteDependencyProvider {
    fn user_repository(&self) -> DynUserRepository {
        Box::new(SqliteUserRepository::new(self.pool.clone()))
    }

    fn workspace_repository(&self) -> DynWorkspaceRepository {
        Box::new(SqliteWorkspaceRepository::new(self.pool.clone()))
    }

    fn membership_repository(&self) -> DynMembershipRepository {
        Box::new(SqliteMembershipRepository::new(self.pool.clone()))
    }

    fn project_repository(&self) -> DynProjectRepository {
        Box::new(SqliteProjectRepository::new(self.pool.clone()))
    }

    fn task_repository(&self) -> DynTaskRepository {
        Box::new(SqliteTaskRepository::new(self.pool.clone()))
    }

    fn token_service(&self) -> DynTokenService {
        Box::new(JwtTokenService::new(&self.config.security.token_secret))
    }

    fn credential_hasher(&self) -> DynCredentialHasher {
        Box::new(Argon2CredentialHasher::new())
    }

    fn registration_service(&self) -> DynRegistrationService {
        Box::new(DefaultRegistrationService::new(
            self.user_repository(),
            self.token_service(),
            self.credential_hasher(),
        ))
    }

    fn membership_service(&self) -> DynMembershipService {
        Box::new(DefaultMembershipService::new(
            self.workspace_repository(),
            self.membership_repository(),
            self.user_repository(),
        ))
    }

    fn directory_service(&self) -> DynDirectoryService {
        Box::new(DefaultDirectoryService::new(
            self.user_repository(),
            self.config.security.search_result_cap,
        ))
    }

    fn board_service(&self) -> DynBoardService {
        Box::new(DefaultBoardService::new(
            self.project_repository(),
            self.task_repository(),
            self.membership_repository(),
            self.workspace_repository(),
        ))
    }

    fn analytics_service(&self) -> DynAnalyticsService {
        Box::new(DefaultAnalyticsService::new(
            self.membership_repository(),
            self.project_repository(),
            self.task_repository(),
        ))
    }
}
