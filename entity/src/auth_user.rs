use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(150))", unique)]
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub is_superuser: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::auth_user_group::Entity")]
    AuthUserGroup,
}

impl Related<super::auth_user_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthUserGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
