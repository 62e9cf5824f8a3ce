use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use entity::{
    branch::BranchKind,
    transaction::{TransactionCategory, TransactionKind},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, ExprTrait, IntoActiveModel, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, SelectTwo,
};

use crate::server::data::{fetch_page, Page};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionParams {
    pub branch_id: i32,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub description: String,
    pub amount_cents: i64,
    pub date: NaiveDate,
}

/// Filters combined with AND, absent fields are ignored
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub branch_id: Option<i32>,
    /// Kind of the owning branch
    pub branch_kind: Option<BranchKind>,
    /// Inclusive lower date bound
    pub start: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub end: Option<NaiveDate>,
    /// Exclusive upper date bound, used for month periods
    pub end_exclusive: Option<NaiveDate>,
}

impl TransactionFilter {
    /// Restricts the filter to a single kind
    pub fn with_kind(&self, kind: TransactionKind) -> Self {
        Self {
            kind: Some(kind),
            ..self.clone()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(kind) = self.kind {
            condition = condition.add(entity::transaction::Column::Kind.eq(kind));
        }
        if let Some(branch_id) = self.branch_id {
            condition = condition.add(entity::transaction::Column::BranchId.eq(branch_id));
        }
        if let Some(branch_kind) = self.branch_kind {
            condition = condition.add(entity::branch::Column::Kind.eq(branch_kind));
        }
        if let Some(start) = self.start {
            condition = condition.add(entity::transaction::Column::Date.gte(start));
        }
        if let Some(end) = self.end {
            condition = condition.add(entity::transaction::Column::Date.lte(end));
        }
        if let Some(end) = self.end_exclusive {
            condition = condition.add(entity::transaction::Column::Date.lt(end));
        }

        condition
    }
}

pub type TransactionWithBranch = (entity::transaction::Model, Option<entity::branch::Model>);

pub struct TransactionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TransactionRepository<'a, C> {
    /// Creates a new instance of [`TransactionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: TransactionParams,
    ) -> Result<entity::transaction::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let transaction = entity::transaction::ActiveModel {
            branch_id: ActiveValue::Set(params.branch_id),
            kind: ActiveValue::Set(params.kind),
            category: ActiveValue::Set(params.category),
            description: ActiveValue::Set(params.description),
            amount_cents: ActiveValue::Set(params.amount_cents),
            date: ActiveValue::Set(params.date),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        transaction.insert(self.db).await
    }

    pub async fn get(
        &self,
        transaction_id: i32,
    ) -> Result<Option<entity::transaction::Model>, DbErr> {
        entity::prelude::Transaction::find_by_id(transaction_id)
            .one(self.db)
            .await
    }

    pub async fn get_with_branch(
        &self,
        transaction_id: i32,
    ) -> Result<Option<TransactionWithBranch>, DbErr> {
        entity::prelude::Transaction::find_by_id(transaction_id)
            .find_also_related(entity::prelude::Branch)
            .one(self.db)
            .await
    }

    /// Returns `None` if the transaction does not exist
    pub async fn update(
        &self,
        transaction_id: i32,
        params: TransactionParams,
    ) -> Result<Option<entity::transaction::Model>, DbErr> {
        let Some(transaction) = self.get(transaction_id).await? else {
            return Ok(None);
        };

        let mut transaction_am = transaction.into_active_model();
        transaction_am.branch_id = ActiveValue::Set(params.branch_id);
        transaction_am.kind = ActiveValue::Set(params.kind);
        transaction_am.category = ActiveValue::Set(params.category);
        transaction_am.description = ActiveValue::Set(params.description);
        transaction_am.amount_cents = ActiveValue::Set(params.amount_cents);
        transaction_am.date = ActiveValue::Set(params.date);
        transaction_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let transaction = transaction_am.update(self.db).await?;

        Ok(Some(transaction))
    }

    pub async fn delete(&self, transaction_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Transaction::delete_by_id(transaction_id)
            .exec(self.db)
            .await
    }

    fn filtered(
        &self,
        filter: &TransactionFilter,
    ) -> SelectTwo<entity::transaction::Entity, entity::branch::Entity> {
        entity::prelude::Transaction::find()
            .find_also_related(entity::prelude::Branch)
            .filter(filter.condition())
            .order_by_desc(entity::transaction::Column::Date)
            .order_by_desc(entity::transaction::Column::Id)
    }

    /// Transactions newest first with insertion order breaking ties, 1-based `page`
    pub async fn list(
        &self,
        filter: &TransactionFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<TransactionWithBranch>, DbErr> {
        let paginator = self.filtered(filter).paginate(self.db, per_page);

        fetch_page(paginator, page, per_page).await
    }

    pub async fn list_all(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionWithBranch>, DbErr> {
        self.filtered(filter).all(self.db).await
    }

    fn joined(filter: &TransactionFilter) -> Select<entity::transaction::Entity> {
        entity::prelude::Transaction::find()
            .join(JoinType::InnerJoin, entity::transaction::Relation::Branch.def())
            .filter(filter.condition())
    }

    /// Sum of cents over the matching transactions, zero when none match
    pub async fn sum(&self, filter: &TransactionFilter) -> Result<i64, DbErr> {
        let total = Self::joined(filter)
            .select_only()
            .column_as(
                entity::transaction::Column::AmountCents
                    .sum()
                    .cast_as("BIGINT"),
                "total",
            )
            .into_tuple::<Option<i64>>()
            .one(self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0))
    }

    /// Sum of cents per branch over the matching transactions
    ///
    /// Branches without matching transactions are absent from the map.
    pub async fn sum_by_branch(
        &self,
        filter: &TransactionFilter,
    ) -> Result<HashMap<i32, i64>, DbErr> {
        let totals = Self::joined(filter)
            .select_only()
            .column(entity::transaction::Column::BranchId)
            .column_as(
                entity::transaction::Column::AmountCents
                    .sum()
                    .cast_as("BIGINT"),
                "total",
            )
            .group_by(entity::transaction::Column::BranchId)
            .into_tuple::<(i32, Option<i64>)>()
            .all(self.db)
            .await?;

        Ok(totals
            .into_iter()
            .map(|(branch_id, total)| (branch_id, total.unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    mod list {
        use branchdesk_test_utils::prelude::*;

        use crate::server::data::transaction::{TransactionFilter, TransactionRepository};

        /// Expect date descending with later insertions first on the same date
        #[tokio::test]
        async fn orders_by_date_then_insertion() -> Result<(), TestError> {
            let mut test = test_setup_with_domain_tables!()?;
            let branch = test.branch().insert_branch("Harbour", BranchKind::Cafe).await?;
            let older = test
                .transaction()
                .insert_transaction(branch.id, TransactionKind::Income, 100, date(2025, 1, 1))
                .await?;
            let first = test
                .transaction()
                .insert_transaction(branch.id, TransactionKind::Expense, 200, date(2025, 1, 5))
                .await?;
            let second = test
                .transaction()
                .insert_transaction(branch.id, TransactionKind::Income, 300, date(2025, 1, 5))
                .await?;

            let repository = TransactionRepository::new(&test.state.db);
            let page = repository.list(&TransactionFilter::default(), 1, 15).await?;

            let ids: Vec<_> = page.items.iter().map(|(t, _)| t.id).collect();
            assert_eq!(ids, vec![second.id, first.id, older.id]);

            Ok(())
        }

        /// Expect kind, branch and inclusive date range filters to combine
        #[tokio::test]
        async fn combines_filters() -> Result<(), TestError> {
            let mut test = test_setup_with_domain_tables!()?;
            let harbour = test.branch().insert_branch("Harbour", BranchKind::Cafe).await?;
            let hill = test.branch().insert_branch("Hill", BranchKind::Hotel).await?;
            let tx = test.transaction();
            let matching = tx
                .insert_transaction(harbour.id, TransactionKind::Income, 100, date(2025, 1, 31))
                .await?;
            tx.insert_transaction(harbour.id, TransactionKind::Expense, 100, date(2025, 1, 10))
                .await?;
            tx.insert_transaction(harbour.id, TransactionKind::Income, 100, date(2025, 2, 1))
                .await?;
            tx.insert_transaction(hill.id, TransactionKind::Income, 100, date(2025, 1, 10))
                .await?;

            let repository = TransactionRepository::new(&test.state.db);
            let filter = TransactionFilter {
                kind: Some(TransactionKind::Income),
                branch_id: Some(harbour.id),
                start: Some(date(2025, 1, 1)),
                end: Some(date(2025, 1, 31)),
                ..Default::default()
            };
            let transactions = repository.list_all(&filter).await?;

            assert_eq!(transactions.len(), 1);
            assert_eq!(transactions[0].0.id, matching.id);

            Ok(())
        }
    }

    mod sum {
        use branchdesk_test_utils::prelude::*;

        use crate::server::data::transaction::{TransactionFilter, TransactionRepository};

        /// Expect sums restricted by kind and branch kind
        #[tokio::test]
        async fn sums_by_kind_and_branch_kind() -> Result<(), TestError> {
            let mut test = test_setup_with_domain_tables!()?;
            let cafe = test.branch().insert_branch("Harbour", BranchKind::Cafe).await?;
            let hotel = test.branch().insert_branch("Hill", BranchKind::Hotel).await?;
            let tx = test.transaction();
            tx.insert_transaction(cafe.id, TransactionKind::Income, 10_000, date(2025, 1, 2))
                .await?;
            tx.insert_transaction(cafe.id, TransactionKind::Expense, 2_550, date(2025, 1, 3))
                .await?;
            tx.insert_transaction(hotel.id, TransactionKind::Income, 50_000, date(2025, 1, 4))
                .await?;

            let repository = TransactionRepository::new(&test.state.db);
            let income = TransactionFilter::default().with_kind(TransactionKind::Income);
            let cafe_income = TransactionFilter {
                branch_kind: Some(BranchKind::Cafe),
                ..income.clone()
            };
            let expense = TransactionFilter::default().with_kind(TransactionKind::Expense);

            assert_eq!(repository.sum(&income).await?, 60_000);
            assert_eq!(repository.sum(&cafe_income).await?, 10_000);
            assert_eq!(repository.sum(&expense).await?, 2_550);

            Ok(())
        }

        /// Expect zero rather than null without transactions
        #[tokio::test]
        async fn zero_without_transactions() -> Result<(), TestError> {
            let test = test_setup_with_domain_tables!()?;

            let repository = TransactionRepository::new(&test.state.db);
            let total = repository.sum(&TransactionFilter::default()).await?;

            assert_eq!(total, 0);

            Ok(())
        }

        /// Expect per-branch sums within a half-open period
        #[tokio::test]
        async fn sums_per_branch_in_period() -> Result<(), TestError> {
            let mut test = test_setup_with_domain_tables!()?;
            let harbour = test.branch().insert_branch("Harbour", BranchKind::Cafe).await?;
            let hill = test.branch().insert_branch("Hill", BranchKind::Hotel).await?;
            let tx = test.transaction();
            tx.insert_transaction(harbour.id, TransactionKind::Income, 700, date(2024, 12, 31))
                .await?;
            tx.insert_transaction(harbour.id, TransactionKind::Income, 900, date(2025, 1, 1))
                .await?;
            tx.insert_transaction(hill.id, TransactionKind::Income, 300, date(2024, 12, 1))
                .await?;

            let repository = TransactionRepository::new(&test.state.db);
            let filter = TransactionFilter {
                kind: Some(TransactionKind::Income),
                start: Some(date(2024, 12, 1)),
                end_exclusive: Some(date(2025, 1, 1)),
                ..Default::default()
            };
            let totals = repository.sum_by_branch(&filter).await?;

            assert_eq!(totals.get(&harbour.id), Some(&700));
            assert_eq!(totals.get(&hill.id), Some(&300));

            Ok(())
        }
    }
}
