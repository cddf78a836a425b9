use async_trait::async_trait;
use derive_new::new;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    data::{
        memberships::MemberRole,
        projects::{DEFAULT_PROJECT_COLOR, Project, ProjectId},
        users::{
            BootstrapDefaults, NewUser, RegisteredUser, User, UserId,
            UserRepository, UserRepositoryError, UserRepositoryErrorInner,
        },
        workspaces::{Workspace, WorkspaceId},
    },
    data_impl::sqlite::{is_unique_violation, timestamp},
};

#[derive(Debug, Clone, new)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

impl UserRow {
    pub(crate) fn into_user(self) -> eyre::Result<User> {
        Ok(User::new(
            UserId::new(self.id),
            self.username,
            self.email,
            self.password_hash,
            timestamp(self.created_at)?,
        ))
    }
}


#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_with_defaults(
        &self,
        user: NewUser,
        defaults: &BootstrapDefaults,
    ) -> Result<RegisteredUser, UserRepositoryError> {
        let now = OffsetDateTime::now_utc();
        let now_seconds = now.unix_timestamp();

        let mut tx = self.pool.begin().await.map_err(eyre::Report::new)?;

        let user_id = sqlx::query(
            "INSERT INTO users (username, email, password_hash, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now_seconds)
        .execute(&mut *tx)
        .await
        .map_err(|e| -> UserRepositoryError {
            if is_unique_violation(&e) {
                UserRepositoryErrorInner::IdentityTaken.into()
            } else {
                eyre::Report::new(e).into()
            }
        })?
        .last_insert_rowid();

        let workspace_id = sqlx::query(
            "INSERT INTO workspaces (name, description, owner_id, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&defaults.workspace_name)
        .bind(&defaults.workspace_description)
        .bind(user_id)
        .bind(now_seconds)
        .execute(&mut *tx)
        .await
        .map_err(eyre::Report::new)?
        .last_insert_rowid();

        sqlx::query(
            "INSERT INTO workspace_memberships \
             (workspace_id, user_id, role, joined_at) VALUES (?, ?, ?, ?)",
        )
        .bind(workspace_id)
        .bind(user_id)
        .bind(MemberRole::Owner.to_string())
        .bind(now_seconds)
        .execute(&mut *tx)
        .await
        .map_err(eyre::Report::new)?;

        let project_id = sqlx::query(
            "INSERT INTO projects (name, description, workspace_id, \
             created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&defaults.project_name)
        .bind(&defaults.project_description)
        .bind(workspace_id)
        .bind(now_seconds)
        .execute(&mut *tx)
        .await
        .map_err(eyre::Report::new)?
        .last_insert_rowid();

        tx.commit().await.map_err(eyre::Report::new)?;

        Ok(RegisteredUser::new(
            User::new(
                UserId::new(user_id),
                user.username,
                user.email,
                user.password_hash,
                now,
            ),
            Workspace::new(
                WorkspaceId::new(workspace_id),
                defaults.workspace_name.clone(),
                defaults.workspace_description.clone(),
                UserId::new(user_id),
                now,
            ),
            Project::new(
                ProjectId::new(project_id),
                defaults.project_name.clone(),
                defaults.project_description.clone(),
                DEFAULT_PROJECT_COLOR.to_string(),
                WorkspaceId::new(workspace_id),
                now,
            ),
        ))
    }

    async fn find_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<User>, UserRepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash, created_at \
             FROM users WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        row.map(UserRow::into_user).transpose().map_err(Into::into)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash, created_at \
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        row.map(UserRow::into_user).transpose().map_err(Into::into)
    }

    async fn search_by_email(
        &self,
        fragment: &str,
        limit: u32,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, password_hash, created_at \
             FROM users WHERE instr(lower(email), lower(?)) > 0 \
             ORDER BY email LIMIT ?",
        )
        .bind(fragment)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(eyre::Report::new)?;

        rows.into_iter()
            .map(|row| row.into_user().map_err(Into::into))
            .collect()
    }
}
