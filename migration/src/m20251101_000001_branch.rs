use sea_orm_migration::{prelude::*, schema::*};

static IDX_BRANCH_NAME: &str = "idx-branch-name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Branch::Table)
                    .if_not_exists()
                    .col(pk_auto(Branch::Id))
                    .col(ColumnDef::new(Branch::Name).string_len(200).not_null().take())
                    .col(
                        ColumnDef::new(Branch::Kind)
                            .string_len(10)
                            .not_null()
                            .default("cafe")
                            .take(),
                    )
                    .col(text(Branch::Address).not_null().take())
                    .col(ColumnDef::new(Branch::Phone).string_len(20).not_null().take())
                    .col(ColumnDef::new(Branch::Manager).string_len(100).not_null().take())
                    .col(timestamp(Branch::CreatedAt))
                    .col(timestamp(Branch::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BRANCH_NAME)
                    .table(Branch::Table)
                    .col(Branch::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_BRANCH_NAME)
                    .table(Branch::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Branch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Branch {
    Table,
    Id,
    Name,
    Kind,
    Address,
    Phone,
    Manager,
    CreatedAt,
    UpdatedAt,
}
