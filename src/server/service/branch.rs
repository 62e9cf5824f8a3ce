use entity::{branch::BranchKind, transaction::TransactionKind};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::DeleteConfirmationDto,
        branch::{BranchDto, BranchFormDto, BranchListDto, BranchSummaryDto},
    },
    server::{
        data::{
            branch::{BranchFilter, BranchParams, BranchRepository},
            transaction::{TransactionFilter, TransactionRepository},
        },
        error::Error,
        form::enum_choices,
        model::db::BranchModel,
        util::{money::from_minor_units, pagination::pagination_dto},
    },
};

pub const BRANCHES_PER_PAGE: u64 = 10;

pub fn branch_dto(branch: BranchModel) -> BranchDto {
    BranchDto {
        id: branch.id,
        name: branch.name,
        kind: branch.kind,
        address: branch.address,
        phone: branch.phone,
        manager: branch.manager,
        created_at: branch.created_at,
        updated_at: branch.updated_at,
    }
}

pub struct BranchService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BranchService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists branches by name descending, each annotated with its staff count and all-time totals
    ///
    /// Pending flash messages are left for the caller to attach.
    pub async fn list(&self, filter: BranchFilter, page: u64) -> Result<BranchListDto, Error> {
        let branch_repo = BranchRepository::new(self.db);
        let transaction_repo = TransactionRepository::new(self.db);

        let page = branch_repo.list(&filter, page, BRANCHES_PER_PAGE).await?;
        let ids: Vec<i32> = page.items.iter().map(|b| b.id).collect();

        let staff_counts = branch_repo.staff_counts(&ids).await?;
        let all_time = TransactionFilter::default();
        let income = transaction_repo
            .sum_by_branch(&all_time.with_kind(TransactionKind::Income))
            .await?;
        let expense = transaction_repo
            .sum_by_branch(&all_time.with_kind(TransactionKind::Expense))
            .await?;

        let pagination = pagination_dto(page.page, page.per_page, page.total_items);
        let branches = page
            .items
            .into_iter()
            .map(|branch| {
                let income = income.get(&branch.id).copied().unwrap_or(0);
                let expense = expense.get(&branch.id).copied().unwrap_or(0);

                BranchSummaryDto {
                    staff_count: staff_counts.get(&branch.id).copied().unwrap_or(0),
                    total_income: from_minor_units(income),
                    total_expense: from_minor_units(expense),
                    net: from_minor_units(income - expense),
                    branch: branch_dto(branch),
                }
            })
            .collect();

        Ok(BranchListDto {
            branches,
            q: filter.q,
            pagination,
            messages: Vec::new(),
        })
    }

    pub async fn get(&self, branch_id: i32) -> Result<BranchDto, Error> {
        BranchRepository::new(self.db)
            .get(branch_id)
            .await?
            .map(branch_dto)
            .ok_or_else(|| Error::not_found("Branch", branch_id))
    }

    pub async fn create(&self, params: BranchParams) -> Result<BranchDto, Error> {
        let branch = BranchRepository::new(self.db).create(params).await?;

        tracing::info!(branch_id = branch.id, name = %branch.name, "Created branch");

        Ok(branch_dto(branch))
    }

    pub async fn update(&self, branch_id: i32, params: BranchParams) -> Result<BranchDto, Error> {
        let branch = BranchRepository::new(self.db)
            .update(branch_id, params)
            .await?
            .ok_or_else(|| Error::not_found("Branch", branch_id))?;

        tracing::info!(branch_id = branch.id, "Updated branch");

        Ok(branch_dto(branch))
    }

    /// Deletes a branch, cascading to its staff, their work logs and its transactions
    pub async fn delete(&self, branch_id: i32) -> Result<(), Error> {
        let result = BranchRepository::new(self.db).delete(branch_id).await?;
        if result.rows_affected == 0 {
            return Err(Error::not_found("Branch", branch_id));
        }

        tracing::info!(branch_id, "Deleted branch");

        Ok(())
    }

    pub async fn delete_confirmation(&self, branch_id: i32) -> Result<DeleteConfirmationDto, Error> {
        let branch = self.get(branch_id).await?;

        Ok(DeleteConfirmationDto {
            id: branch.id,
            summary: branch.name,
        })
    }

    /// Initial form state, blank with the cafe default unless editing `branch_id`
    pub async fn form(&self, branch_id: Option<i32>) -> Result<BranchFormDto, Error> {
        let branch = match branch_id {
            Some(id) => Some(self.get(id).await?),
            None => None,
        };

        Ok(BranchFormDto {
            kind: branch.as_ref().map(|b| b.kind).unwrap_or_default(),
            branch,
            kind_choices: enum_choices::<BranchKind>(BranchKind::label),
        })
    }
}
