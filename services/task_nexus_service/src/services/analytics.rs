use async_trait::async_trait;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, IntoDiscriminant};
use utoipa::ToSchema;

use crate::data::{
    memberships::MembershipRepositoryError,
    projects::ProjectRepositoryError,
    tasks::{PriorityCount, StatusCount, TaskRepositoryError},
    users::UserId,
};

/// Read-time aggregate over the tasks of every workspace the user belongs
/// to. Assembled from independent count queries rather than one snapshot
/// transaction; writes landing between the sub-queries can show through,
/// which is acceptable for a dashboard.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    new,
    ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub in_progress_tasks: i64,
    pub overdue_tasks: i64,
    pub total_projects: i64,
    pub total_workspaces: i64,
    /// Carried for wire-shape compatibility; always empty in this scope.
    pub recent_activity: Vec<serde_json::Value>,
    pub tasks_by_status: Vec<StatusCount>,
    pub tasks_by_priority: Vec<PriorityCount>,
}

#[async_trait]
pub trait AnalyticsService: Send + Sync + 'static {
    /// An all-zero summary with empty breakdowns when the user has no
    /// memberships; scoped counts otherwise.
    async fn dashboard(
        &self,
        user: UserId,
    ) -> Result<DashboardSummary, AnalyticsServiceError>;
}

pub type DynAnalyticsService = Box<dyn AnalyticsService>;

#[derive(Debug, thiserror::Error)]
#[error("{inner}")]
pub struct AnalyticsServiceError {
    inner: AnalyticsServiceErrorInner,
    kind: AnalyticsServiceErrorKind,
}

impl AnalyticsServiceError {
    #[allow(unused)]
    pub fn kind(&self) -> AnalyticsServiceErrorKind {
        self.kind
    }
}

impl<T: Into<AnalyticsServiceErrorInner>> From<T> for AnalyticsServiceError {
    fn from(inner: T) -> Self {
        let inner = inner.into();
        Self {
            kind: inner.discriminant(),
            inner,
        }
    }
}

#[derive(Debug, EnumDiscriminants, thiserror::Error)]
#[strum_discriminants(vis(pub), name(AnalyticsServiceErrorKind))]
pub enum AnalyticsServiceErrorInner {
    #[error(transparent)]
    Custom(#[from] eyre::Report),

    #[error(transparent)]
    MembershipRepository(#[from] MembershipRepositoryError),

    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),

    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}
