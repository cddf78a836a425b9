mod membership_repository;
mod pool;
mod project_repository;
mod schema;
mod task_repository;
mod user_repository;
mod workspace_repository;

pub use membership_repository::*;
pub use pool::*;
pub use project_repository::*;
pub use schema::*;
pub use task_repository::*;
pub use user_repository::*;
pub use workspace_repository::*;

use time::OffsetDateTime;

use crate::data::workspaces::WorkspaceId;

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}

pub(crate) fn timestamp(seconds: i64) -> eyre::Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(seconds).map_err(eyre::Report::new)
}

/// Renders workspace ids as an SQL `IN` list body. Ids are integers straight
/// from the store, so inlining them is injection-safe. Callers must guard
/// against an empty slice; `IN ()` is not valid SQLite.
pub(crate) fn workspace_ids_csv(ids: &[WorkspaceId]) -> String {
    ids.iter()
        .map(|id| id.0.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
