use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AuthUser::Id))
                    .col(
                        ColumnDef::new(AuthUser::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key()
                            .take(),
                    )
                    .col(string(AuthUser::PasswordHash))
                    .col(boolean(AuthUser::IsSuperuser).default(false).take())
                    .col(timestamp(AuthUser::CreatedAt))
                    .col(timestamp(AuthUser::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AuthUser {
    Table,
    Id,
    Username,
    PasswordHash,
    IsSuperuser,
    CreatedAt,
    UpdatedAt,
}
