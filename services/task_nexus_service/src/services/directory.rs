use async_trait::async_trait;

use crate::data::users::PublicUser;

/// Queries shorter than this return no matches.
pub const MIN_QUERY_LENGTH: usize = 3;

#[async_trait]
pub trait DirectoryService: Send + Sync + 'static {
    /// Case-insensitive substring search over user emails, capped at the
    /// configured result limit. Short queries and store failures both
    /// degrade to an empty list; search is advisory, and inviting by a
    /// fully typed email stays available when it misbehaves.
    ///
    /// Results are NOT filtered against any workspace's member list. That
    /// exclusion is a presentation concern; callers must not treat it as a
    /// guarantee of this operation.
    async fn search_users(&self, partial_email: &str) -> Vec<PublicUser>;
}

pub type DynDirectoryService = Box<dyn DirectoryService>;
