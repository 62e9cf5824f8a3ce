use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_staff::Staff;

static IDX_WORK_LOG_STAFF_ID: &str = "idx-work_log-staff_id";
static IDX_WORK_LOG_DATE: &str = "idx-work_log-date";
static FK_WORK_LOG_STAFF_ID: &str = "fk-work_log-staff_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkLog::Table)
                    .if_not_exists()
                    .col(pk_auto(WorkLog::Id))
                    .col(integer(WorkLog::StaffId))
                    .col(date(WorkLog::Date))
                    .col(big_integer(WorkLog::HoursHundredths))
                    .col(text(WorkLog::Description).not_null().default("").take())
                    .col(timestamp(WorkLog::CreatedAt))
                    .col(timestamp(WorkLog::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_WORK_LOG_STAFF_ID)
                            .from(WorkLog::Table, WorkLog::StaffId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WORK_LOG_STAFF_ID)
                    .table(WorkLog::Table)
                    .col(WorkLog::StaffId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WORK_LOG_DATE)
                    .table(WorkLog::Table)
                    .col(WorkLog::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WORK_LOG_DATE)
                    .table(WorkLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WORK_LOG_STAFF_ID)
                    .table(WorkLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WorkLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WorkLog {
    Table,
    Id,
    StaffId,
    Date,
    HoursHundredths,
    Description,
    CreatedAt,
    UpdatedAt,
}
