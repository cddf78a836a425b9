use derive_new::new;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::data::workspaces::WorkspaceId;

/// Display color assigned to projects created without one.
pub const DEFAULT_PROJECT_COLOR: &str = "#3B82F6";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, new, ToSchema)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub workspace_id: WorkspaceId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    new,
    ToSchema,
)]
#[repr(transparent)]
pub struct ProjectId(pub i64);

/// A project annotated with its task totals. `task_count` spans every
/// status bucket; `completed_count` only tasks whose status is done.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, new, ToSchema)]
pub struct ProjectWithCounts {
    #[serde(flatten)]
    pub project: Project,
    pub task_count: i64,
    pub completed_count: i64,
}

#[derive(Debug, Clone, PartialEq, new)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub color: String,
    pub workspace_id: WorkspaceId,
}
