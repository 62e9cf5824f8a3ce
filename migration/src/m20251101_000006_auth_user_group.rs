use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000005_auth_user::AuthUser;

static IDX_AUTH_USER_GROUP_USER_ID_GROUP: &str = "idx-auth_user_group-user_id-group";
static FK_AUTH_USER_GROUP_USER_ID: &str = "fk-auth_user_group-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthUserGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthUserGroup::Id))
                    .col(integer(AuthUserGroup::UserId))
                    .col(ColumnDef::new(AuthUserGroup::Group).string_len(20).not_null().take())
                    .col(timestamp(AuthUserGroup::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_AUTH_USER_GROUP_USER_ID)
                            .from(AuthUserGroup::Table, AuthUserGroup::UserId)
                            .to(AuthUser::Table, AuthUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AUTH_USER_GROUP_USER_ID_GROUP)
                    .table(AuthUserGroup::Table)
                    .col(AuthUserGroup::UserId)
                    .col(AuthUserGroup::Group)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AUTH_USER_GROUP_USER_ID_GROUP)
                    .table(AuthUserGroup::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AuthUserGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuthUserGroup {
    Table,
    Id,
    UserId,
    Group,
    CreatedAt,
}
