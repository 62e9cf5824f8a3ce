//! Authentication service layer.
//!
//! Verifies username/password submissions against stored argon2 hashes and builds the
//! per-request [`Identity`] from the user record and their group memberships.

pub mod password;

use sea_orm::{ActiveEnum, DatabaseConnection};

use crate::{
    model::user::UserDto,
    server::{
        data::user::UserRepository,
        error::Error,
        model::identity::{Identity, RoleScope},
        service::auth::password::{hash_password, verify_password},
    },
};

pub fn user_dto(identity: &Identity) -> UserDto {
    UserDto {
        id: identity.user_id,
        username: identity.username.clone(),
        is_superuser: identity.is_superuser,
        groups: identity
            .groups
            .iter()
            .map(|group| group.to_value())
            .collect(),
        branch_manager_restricted: identity.scope() == RoleScope::BranchManager,
        permissions: identity
            .permissions()
            .into_iter()
            .map(|permission| permission.to_string())
            .collect(),
    }
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the identity of `user_id` with group memberships as currently stored
    ///
    /// # Returns
    /// - `Ok(Some(Identity))` - User exists
    /// - `Ok(None)` - No user with that ID, e.g. deleted while a session was still active
    pub async fn identity(&self, user_id: i32) -> Result<Option<Identity>, Error> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.get(user_id).await? else {
            return Ok(None);
        };
        let groups = user_repo.get_groups(user.id).await?;

        Ok(Some(Identity {
            user_id: user.id,
            username: user.username,
            is_superuser: user.is_superuser,
            groups,
        }))
    }

    /// Verifies a credential submission
    ///
    /// Returns `None` for an unknown username and a wrong password alike.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<Identity>, Error> {
        let Some(user) = UserRepository::new(self.db)
            .get_by_username(username.trim())
            .await?
        else {
            tracing::debug!(username = %username, "Login attempt for unknown user");
            return Ok(None);
        };

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = user.id, "Login attempt with wrong password");
            return Ok(None);
        }

        self.identity(user.id).await
    }

    /// Creates a superuser named `username` unless an account with that name exists
    ///
    /// Returns true when a user was created.
    pub async fn ensure_superuser(&self, username: &str, password: &str) -> Result<bool, Error> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.get_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(password)?;
        let user = user_repo.create(username, password_hash, true).await?;

        tracing::info!(user_id = user.id, username = %user.username, "Created initial superuser");

        Ok(true)
    }
}
