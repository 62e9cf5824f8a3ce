use chrono::NaiveDate;
use entity::transaction::{TransactionCategory, TransactionKind};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::DeleteConfirmationDto,
        transaction::{TransactionDto, TransactionFormDto, TransactionListDto},
    },
    server::{
        data::{
            branch::BranchRepository,
            transaction::{
                TransactionFilter, TransactionParams, TransactionRepository, TransactionWithBranch,
            },
        },
        error::Error,
        form::enum_choices,
        service::{branch_choices, money_totals},
        util::{money::from_minor_units, pagination::pagination_dto},
    },
};

pub fn transaction_dto((transaction, branch): TransactionWithBranch) -> TransactionDto {
    TransactionDto {
        id: transaction.id,
        branch_id: transaction.branch_id,
        branch_name: branch.map(|b| b.name).unwrap_or_default(),
        kind: transaction.kind,
        category: transaction.category,
        amount: from_minor_units(transaction.amount_cents),
        date: transaction.date,
        description: transaction.description,
        created_at: transaction.created_at,
        updated_at: transaction.updated_at,
    }
}

pub struct TransactionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TransactionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists transactions newest first with income and expense totals over the whole filtered set
    pub async fn list(
        &self,
        filter: TransactionFilter,
        page: u64,
        per_page: u64,
    ) -> Result<TransactionListDto, Error> {
        let transaction_repo = TransactionRepository::new(self.db);

        let page = transaction_repo.list(&filter, page, per_page).await?;
        let income = transaction_repo
            .sum(&filter.with_kind(TransactionKind::Income))
            .await?;
        let expense = transaction_repo
            .sum(&filter.with_kind(TransactionKind::Expense))
            .await?;
        let branches = BranchRepository::new(self.db).all().await?;

        let pagination = pagination_dto(page.page, page.per_page, page.total_items);

        Ok(TransactionListDto {
            transactions: page.items.into_iter().map(transaction_dto).collect(),
            totals: money_totals(income, expense),
            kind: filter.kind,
            branch: filter.branch_id,
            start: filter.start,
            end: filter.end,
            branch_choices: branch_choices(&branches),
            pagination,
            messages: Vec::new(),
        })
    }

    /// Every transaction matching `filter`, for printing and exports
    pub async fn list_all(&self, filter: &TransactionFilter) -> Result<Vec<TransactionDto>, Error> {
        let transactions = TransactionRepository::new(self.db).list_all(filter).await?;

        Ok(transactions.into_iter().map(transaction_dto).collect())
    }

    pub async fn get(&self, transaction_id: i32) -> Result<TransactionDto, Error> {
        TransactionRepository::new(self.db)
            .get_with_branch(transaction_id)
            .await?
            .map(transaction_dto)
            .ok_or_else(|| Error::not_found("Transaction", transaction_id))
    }

    pub async fn create(&self, params: TransactionParams) -> Result<TransactionDto, Error> {
        let transaction = TransactionRepository::new(self.db).create(params).await?;

        tracing::info!(
            transaction_id = transaction.id,
            branch_id = transaction.branch_id,
            kind = transaction.kind.label(),
            "Created transaction"
        );

        self.get(transaction.id).await
    }

    pub async fn update(
        &self,
        transaction_id: i32,
        params: TransactionParams,
    ) -> Result<TransactionDto, Error> {
        TransactionRepository::new(self.db)
            .update(transaction_id, params)
            .await?
            .ok_or_else(|| Error::not_found("Transaction", transaction_id))?;

        tracing::info!(transaction_id, "Updated transaction");

        self.get(transaction_id).await
    }

    pub async fn delete(&self, transaction_id: i32) -> Result<(), Error> {
        let result = TransactionRepository::new(self.db)
            .delete(transaction_id)
            .await?;
        if result.rows_affected == 0 {
            return Err(Error::not_found("Transaction", transaction_id));
        }

        tracing::info!(transaction_id, "Deleted transaction");

        Ok(())
    }

    pub async fn delete_confirmation(
        &self,
        transaction_id: i32,
    ) -> Result<DeleteConfirmationDto, Error> {
        let transaction = self.get(transaction_id).await?;

        Ok(DeleteConfirmationDto {
            id: transaction.id,
            summary: format!(
                "{} - {} - {}",
                transaction.branch_name,
                transaction.kind.label(),
                transaction.amount
            ),
        })
    }

    /// Initial form state, dated `today` unless editing `transaction_id`
    pub async fn form(
        &self,
        transaction_id: Option<i32>,
        today: NaiveDate,
    ) -> Result<TransactionFormDto, Error> {
        let transaction = match transaction_id {
            Some(id) => Some(self.get(id).await?),
            None => None,
        };
        let branches = BranchRepository::new(self.db).all().await?;

        Ok(TransactionFormDto {
            date: transaction.as_ref().map(|t| t.date).unwrap_or(today),
            transaction,
            branch_choices: branch_choices(&branches),
            kind_choices: enum_choices::<TransactionKind>(TransactionKind::label),
            category_choices: enum_choices::<TransactionCategory>(TransactionCategory::label),
        })
    }
}
