use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_branch::Branch;

static IDX_TRANSACTION_BRANCH_ID: &str = "idx-transaction-branch_id";
static IDX_TRANSACTION_DATE: &str = "idx-transaction-date";
static FK_TRANSACTION_BRANCH_ID: &str = "fk-transaction-branch_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(pk_auto(Transaction::Id))
                    .col(integer(Transaction::BranchId))
                    .col(ColumnDef::new(Transaction::Kind).string_len(10).not_null().take())
                    .col(
                        ColumnDef::new(Transaction::Category)
                            .string_len(100)
                            .not_null()
                            .default("cash")
                            .take(),
                    )
                    .col(text(Transaction::Description).not_null().default("").take())
                    .col(big_integer(Transaction::AmountCents))
                    .col(date(Transaction::Date))
                    .col(timestamp(Transaction::CreatedAt))
                    .col(timestamp(Transaction::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TRANSACTION_BRANCH_ID)
                            .from(Transaction::Table, Transaction::BranchId)
                            .to(Branch::Table, Branch::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TRANSACTION_BRANCH_ID)
                    .table(Transaction::Table)
                    .col(Transaction::BranchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TRANSACTION_DATE)
                    .table(Transaction::Table)
                    .col(Transaction::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TRANSACTION_DATE)
                    .table(Transaction::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TRANSACTION_BRANCH_ID)
                    .table(Transaction::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Transaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Transaction {
    Table,
    Id,
    BranchId,
    Kind,
    Category,
    Description,
    AmountCents,
    Date,
    CreatedAt,
    UpdatedAt,
}
