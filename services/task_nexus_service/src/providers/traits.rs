use crate::{
    data::{
        memberships::DynMembershipRepository,
        projects::DynProjectRepository, tasks::DynTaskRepository,
        users::DynUserRepository, workspaces::DynWorkspaceRepository,
    },
    security::{DynCredentialHasher, DynTokenService},
    services::{
        DynAnalyticsService, DynBoardService, DynDirectoryService,
        DynMembershipService, DynRegistrationService,
    },
};

pub trait DependencyProvider: Send + Sync + 'static {
    fn user_repository(&self) -> DynUserRepository;
    fn workspace_repository(&self) -> DynWorkspaceRepository;
    fn membership_repository(&self) -> DynMembershipRepository;
    fn project_repository(&self) -> DynProjectRepository;
    fn task_repository(&self) -> DynTaskRepository;

    fn token_service(&self) -> DynTokenService;
    fn credential_hasher(&self) -> DynCredentialHasher;

    fn registration_service(&self) -> DynRegistrationService;
    fn membership_service(&self) -> DynMembershipService;
    fn directory_service(&self) -> DynDirectoryService;
    fn board_service(&self) -> DynBoardService;
    fn analytics_service(&self) -> DynAnalyticsService;
}
