use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::DeleteConfirmationDto,
        work_log::{WorkLogDto, WorkLogFormDto, WorkLogListDto, WorkLogStatsDto},
    },
    server::{
        data::{
            branch::BranchRepository,
            staff::StaffRepository,
            work_log::{WorkLogFilter, WorkLogParams, WorkLogRepository, WorkLogWithStaff},
        },
        error::Error,
        model::db::{BranchModel, WorkLogModel},
        service::{branch_choices, staff_choices},
        util::{
            money::{average_of_minor_units, from_minor_units},
            pagination::pagination_dto,
            period::MonthPeriod,
        },
    },
};

pub const WORK_LOGS_PER_PAGE: u64 = 15;

/// Total hours of one staff member within a report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaffHoursRow {
    pub staff_name: String,
    pub total_hours: Decimal,
}

fn work_log_dto(
    (work_log, staff): WorkLogWithStaff,
    branches: &HashMap<i32, BranchModel>,
) -> WorkLogDto {
    let branch = staff.as_ref().and_then(|s| branches.get(&s.branch_id));

    WorkLogDto {
        id: work_log.id,
        staff_id: work_log.staff_id,
        staff_name: staff.as_ref().map(|s| s.full_name()).unwrap_or_default(),
        branch_id: staff.as_ref().map(|s| s.branch_id).unwrap_or_default(),
        branch_name: branch.map(|b| b.name.clone()).unwrap_or_default(),
        date: work_log.date,
        hours: from_minor_units(work_log.hours_hundredths),
        description: work_log.description,
        created_at: work_log.created_at,
        updated_at: work_log.updated_at,
    }
}

/// Restricts `filter` to the dates of `period`
fn within(period: &MonthPeriod, filter: WorkLogFilter) -> WorkLogFilter {
    WorkLogFilter {
        start: Some(period.start()),
        end: Some(period.end()),
        ..filter
    }
}

pub struct WorkLogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkLogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn to_dtos(&self, rows: Vec<WorkLogWithStaff>) -> Result<Vec<WorkLogDto>, Error> {
        let mut branch_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, staff)| staff.as_ref().map(|s| s.branch_id))
            .collect();
        branch_ids.sort_unstable();
        branch_ids.dedup();

        let branches = BranchRepository::new(self.db).get_many(&branch_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| work_log_dto(row, &branches))
            .collect())
    }

    /// Lists the work logs of `period` matching `filter` with hour statistics over all of them
    pub async fn list(
        &self,
        period: MonthPeriod,
        filter: WorkLogFilter,
        page: u64,
    ) -> Result<WorkLogListDto, Error> {
        let work_log_repo = WorkLogRepository::new(self.db);
        let filter = within(&period, filter);

        let page = work_log_repo.list(&filter, page, WORK_LOGS_PER_PAGE).await?;
        let total_hours = work_log_repo.total_hours(&filter).await?;
        let staff_count = work_log_repo.staff_count(&filter).await?;

        let staff = StaffRepository::new(self.db).all().await?;
        let branches = BranchRepository::new(self.db).all().await?;

        let pagination = pagination_dto(page.page, page.per_page, page.total_items);
        let work_logs = self.to_dtos(page.items).await?;

        Ok(WorkLogListDto {
            work_logs,
            stats: WorkLogStatsDto {
                total_hours: from_minor_units(total_hours),
                staff_count,
                average_hours: average_of_minor_units(total_hours, staff_count),
            },
            period: period.to_dto(),
            staff: filter.staff_id,
            branch: filter.branch_id,
            q: filter.q,
            staff_choices: staff_choices(&staff),
            branch_choices: branch_choices(&branches),
            pagination,
            messages: Vec::new(),
        })
    }

    /// Every work log of `period` matching `filter`, for printing and exports
    pub async fn list_all(
        &self,
        period: MonthPeriod,
        filter: WorkLogFilter,
    ) -> Result<Vec<WorkLogDto>, Error> {
        let rows = WorkLogRepository::new(self.db)
            .list_all(&within(&period, filter))
            .await?;

        self.to_dtos(rows).await
    }

    /// Hours per staff member within `period`, largest total first
    pub async fn hours_by_staff(
        &self,
        period: MonthPeriod,
        filter: WorkLogFilter,
    ) -> Result<Vec<StaffHoursRow>, Error> {
        let totals = WorkLogRepository::new(self.db)
            .hours_by_staff(&within(&period, filter))
            .await?;
        let ids: Vec<i32> = totals.iter().map(|(id, _)| *id).collect();
        let staff = StaffRepository::new(self.db).get_many(&ids).await?;

        Ok(totals
            .into_iter()
            .map(|(staff_id, hours)| StaffHoursRow {
                staff_name: staff
                    .get(&staff_id)
                    .map(|s| s.full_name())
                    .unwrap_or_default(),
                total_hours: from_minor_units(hours),
            })
            .collect())
    }

    /// The stored record, needed to validate an edit against the current staff member's branch
    pub async fn get_model(&self, work_log_id: i32) -> Result<WorkLogModel, Error> {
        WorkLogRepository::new(self.db)
            .get(work_log_id)
            .await?
            .ok_or_else(|| Error::not_found("Work log", work_log_id))
    }

    pub async fn get(&self, work_log_id: i32) -> Result<WorkLogDto, Error> {
        let row = WorkLogRepository::new(self.db)
            .get_with_staff(work_log_id)
            .await?
            .ok_or_else(|| Error::not_found("Work log", work_log_id))?;

        let mut dtos = self.to_dtos(vec![row]).await?;
        dtos.pop()
            .ok_or_else(|| Error::InternalError("work log conversion dropped a row".to_string()))
    }

    pub async fn create(&self, params: WorkLogParams) -> Result<WorkLogDto, Error> {
        let work_log = WorkLogRepository::new(self.db).create(params).await?;

        tracing::info!(
            work_log_id = work_log.id,
            staff_id = work_log.staff_id,
            "Created work log"
        );

        self.get(work_log.id).await
    }

    pub async fn update(&self, work_log_id: i32, params: WorkLogParams) -> Result<WorkLogDto, Error> {
        WorkLogRepository::new(self.db)
            .update(work_log_id, params)
            .await?
            .ok_or_else(|| Error::not_found("Work log", work_log_id))?;

        tracing::info!(work_log_id, "Updated work log");

        self.get(work_log_id).await
    }

    pub async fn delete(&self, work_log_id: i32) -> Result<(), Error> {
        let result = WorkLogRepository::new(self.db).delete(work_log_id).await?;
        if result.rows_affected == 0 {
            return Err(Error::not_found("Work log", work_log_id));
        }

        tracing::info!(work_log_id, "Deleted work log");

        Ok(())
    }

    pub async fn delete_confirmation(
        &self,
        work_log_id: i32,
    ) -> Result<DeleteConfirmationDto, Error> {
        let work_log = self.get(work_log_id).await?;

        Ok(DeleteConfirmationDto {
            id: work_log.id,
            summary: format!(
                "{} - {} - {} hours",
                work_log.staff_name, work_log.date, work_log.hours
            ),
        })
    }

    /// Initial form state.
    ///
    /// When editing, the branch is pre-selected from the staff member's branch. When creating,
    /// `branch` may be passed to populate the staff choices and the date defaults to `today`.
    pub async fn form(
        &self,
        work_log_id: Option<i32>,
        branch: Option<i32>,
        today: NaiveDate,
    ) -> Result<WorkLogFormDto, Error> {
        let work_log = match work_log_id {
            Some(id) => Some(self.get(id).await?),
            None => None,
        };

        let branch = match &work_log {
            Some(work_log) => Some(work_log.branch_id),
            None => branch,
        };
        let staff = match branch {
            Some(branch_id) => StaffRepository::new(self.db).by_branch(branch_id).await?,
            None => Vec::new(),
        };
        let branches = BranchRepository::new(self.db).all().await?;

        Ok(WorkLogFormDto {
            date: work_log.as_ref().map(|w| w.date).unwrap_or(today),
            work_log,
            branch,
            branch_choices: branch_choices(&branches),
            staff_choices: staff_choices(&staff),
        })
    }
}
