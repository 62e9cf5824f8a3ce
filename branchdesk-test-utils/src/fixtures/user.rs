use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use entity::auth_user_group::UserGroup;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestSetup};

impl TestSetup {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> UserFixtures<'a> {
    /// Insert an account with an argon2 hash of `password` and the given group memberships
    pub async fn insert_user(
        &self,
        username: &str,
        password: &str,
        is_superuser: bool,
        groups: &[UserGroup],
    ) -> Result<entity::auth_user::Model, TestError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| TestError::PasswordHash(e.to_string()))?
            .to_string();

        let user = entity::prelude::AuthUser::insert(entity::auth_user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            password_hash: ActiveValue::Set(password_hash),
            is_superuser: ActiveValue::Set(is_superuser),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.state.db)
        .await?;

        for group in groups {
            entity::prelude::AuthUserGroup::insert(entity::auth_user_group::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                group: ActiveValue::Set(*group),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.state.db)
            .await?;
        }

        Ok(user)
    }
}
