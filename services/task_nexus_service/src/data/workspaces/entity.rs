use derive_new::new;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::data::users::UserId;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, new, ToSchema)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub description: String,
    pub owner_id: UserId,
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
pub struct WorkspaceId(pub i64);
