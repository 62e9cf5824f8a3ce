//! Dashboard figures.
//!
//! Counts and money totals are all-time while the per-branch breakdown covers the selected
//! month only.

use entity::{branch::BranchKind, transaction::TransactionKind};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::MoneyTotalsDto,
        dashboard::{BranchPeriodDto, DashboardDto},
    },
    server::{
        data::{
            branch::BranchRepository,
            staff::StaffRepository,
            transaction::{TransactionFilter, TransactionRepository},
        },
        error::Error,
        service::money_totals,
        util::{money::from_minor_units, period::MonthPeriod},
    },
};

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn totals(&self, filter: TransactionFilter) -> Result<MoneyTotalsDto, Error> {
        let transaction_repo = TransactionRepository::new(self.db);

        let income = transaction_repo
            .sum(&filter.with_kind(TransactionKind::Income))
            .await?;
        let expense = transaction_repo
            .sum(&filter.with_kind(TransactionKind::Expense))
            .await?;

        Ok(money_totals(income, expense))
    }

    pub async fn dashboard(&self, period: MonthPeriod) -> Result<DashboardDto, Error> {
        let branch_repo = BranchRepository::new(self.db);
        let staff_repo = StaffRepository::new(self.db);
        let transaction_repo = TransactionRepository::new(self.db);

        let totals = self.totals(TransactionFilter::default()).await?;
        let cafe_totals = self
            .totals(TransactionFilter {
                branch_kind: Some(BranchKind::Cafe),
                ..Default::default()
            })
            .await?;
        let hotel_totals = self
            .totals(TransactionFilter {
                branch_kind: Some(BranchKind::Hotel),
                ..Default::default()
            })
            .await?;

        let month = TransactionFilter {
            start: Some(period.start()),
            end_exclusive: Some(period.end()),
            ..Default::default()
        };
        let income = transaction_repo
            .sum_by_branch(&month.with_kind(TransactionKind::Income))
            .await?;
        let expense = transaction_repo
            .sum_by_branch(&month.with_kind(TransactionKind::Expense))
            .await?;

        let branches = branch_repo
            .all()
            .await?
            .into_iter()
            .map(|branch| {
                let income = income.get(&branch.id).copied().unwrap_or(0);
                let expense = expense.get(&branch.id).copied().unwrap_or(0);

                BranchPeriodDto {
                    branch_id: branch.id,
                    name: branch.name,
                    kind: branch.kind,
                    income: from_minor_units(income),
                    expense: from_minor_units(expense),
                    net: from_minor_units(income - expense),
                }
            })
            .collect();

        Ok(DashboardDto {
            period: period.to_dto(),
            branch_count: branch_repo.count(None).await?,
            staff_count: staff_repo.count(None).await?,
            cafe_count: branch_repo.count(Some(BranchKind::Cafe)).await?,
            hotel_count: branch_repo.count(Some(BranchKind::Hotel)).await?,
            cafe_staff_count: staff_repo.count(Some(BranchKind::Cafe)).await?,
            hotel_staff_count: staff_repo.count(Some(BranchKind::Hotel)).await?,
            totals,
            cafe_totals,
            hotel_totals,
            branches,
        })
    }
}
