use chrono::Utc;
use entity::auth_user_group::UserGroup;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user
    ///
    /// # Arguments
    /// - `username`: Unique login name
    /// - `password_hash`: Argon2 PHC string, never the plain password
    /// - `is_superuser`: Grants every permission regardless of groups
    pub async fn create(
        &self,
        username: &str,
        password_hash: String,
        is_superuser: bool,
    ) -> Result<entity::auth_user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let user = entity::auth_user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            password_hash: ActiveValue::Set(password_hash),
            is_superuser: ActiveValue::Set(is_superuser),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::auth_user::Model>, DbErr> {
        entity::prelude::AuthUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::auth_user::Model>, DbErr> {
        entity::prelude::AuthUser::find()
            .filter(entity::auth_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Groups the user belongs to, in the order they were granted
    pub async fn get_groups(&self, user_id: i32) -> Result<Vec<UserGroup>, DbErr> {
        entity::prelude::AuthUserGroup::find()
            .select_only()
            .column(entity::auth_user_group::Column::Group)
            .filter(entity::auth_user_group::Column::UserId.eq(user_id))
            .order_by_asc(entity::auth_user_group::Column::Id)
            .into_tuple::<UserGroup>()
            .all(self.db)
            .await
    }
}
