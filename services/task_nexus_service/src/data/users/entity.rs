use derive_new::new;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// A registered account. The credential is stored as a one-way salted hash
/// and never leaves the data layer; callers see [`PublicUser`].
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn to_public(&self) -> PublicUser {
        PublicUser::new(self.id, self.username.clone(), self.email.clone())
    }
}

#[derive(
    Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, new, ToSchema,
)]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
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
pub struct UserId(pub i64);

/// Payload for creating a user row. The password is already hashed by the
/// time it reaches the data layer.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
