use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_branch::Branch;

static IDX_STAFF_BRANCH_ID: &str = "idx-staff-branch_id";
static FK_STAFF_BRANCH_ID: &str = "fk-staff-branch_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(pk_auto(Staff::Id))
                    .col(integer(Staff::BranchId))
                    .col(ColumnDef::new(Staff::FirstName).string_len(100).not_null().take())
                    .col(ColumnDef::new(Staff::LastName).string_len(100).not_null().take())
                    .col(ColumnDef::new(Staff::Position).string_len(100).not_null().take())
                    .col(date(Staff::HireDate))
                    .col(ColumnDef::new(Staff::Phone).string_len(20).not_null().take())
                    .col(ColumnDef::new(Staff::Email).string_len(254).null().take())
                    .col(timestamp(Staff::CreatedAt))
                    .col(timestamp(Staff::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_STAFF_BRANCH_ID)
                            .from(Staff::Table, Staff::BranchId)
                            .to(Branch::Table, Branch::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STAFF_BRANCH_ID)
                    .table(Staff::Table)
                    .col(Staff::BranchId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STAFF_BRANCH_ID)
                    .table(Staff::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Staff {
    Table,
    Id,
    BranchId,
    FirstName,
    LastName,
    Position,
    HireDate,
    Phone,
    Email,
    CreatedAt,
    UpdatedAt,
}
