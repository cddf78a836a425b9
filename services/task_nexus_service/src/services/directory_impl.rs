use async_trait::async_trait;
use derive_new::new;

use crate::{
    data::users::{DynUserRepository, PublicUser, User},
    services::{DirectoryService, MIN_QUERY_LENGTH},
};

#[derive(new)]
pub struct DefaultDirectoryService {
    users: DynUserRepository,
    result_cap: u32,
}

#[async_trait]
impl DirectoryService for DefaultDirectoryService {
    async fn search_users(&self, partial_email: &str) -> Vec<PublicUser> {
        if partial_email.chars().count() < MIN_QUERY_LENGTH {
            return Vec::new();
        }

        match self
            .users
            .search_by_email(partial_email, self.result_cap)
            .await
        {
            Ok(users) => users.iter().map(User::to_public).collect(),
            Err(e) => {
                tracing::error!("user directory search failed: {e}");
                Vec::new()
            }
        }
    }
}
