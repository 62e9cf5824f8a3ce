use std::collections::HashMap;

use chrono::Utc;
use entity::branch::BranchKind;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, DeleteResult, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::server::data::{fetch_page, icontains, search_term, Page};

/// Validated values of a branch form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchParams {
    pub name: String,
    pub kind: BranchKind,
    pub address: String,
    pub phone: String,
    pub manager: String,
}

#[derive(Clone, Debug, Default)]
pub struct BranchFilter {
    /// Matched case-insensitively against the branch name
    pub q: Option<String>,
}

impl BranchFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(q) = search_term(self.q.as_deref()) {
            condition = condition.add(icontains(
                vec![Expr::col((entity::prelude::Branch, entity::branch::Column::Name)).into()],
                q,
            ));
        }

        condition
    }
}

pub struct BranchRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BranchRepository<'a, C> {
    /// Creates a new instance of [`BranchRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: BranchParams) -> Result<entity::branch::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let branch = entity::branch::ActiveModel {
            name: ActiveValue::Set(params.name),
            kind: ActiveValue::Set(params.kind),
            address: ActiveValue::Set(params.address),
            phone: ActiveValue::Set(params.phone),
            manager: ActiveValue::Set(params.manager),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        branch.insert(self.db).await
    }

    pub async fn get(&self, branch_id: i32) -> Result<Option<entity::branch::Model>, DbErr> {
        entity::prelude::Branch::find_by_id(branch_id)
            .one(self.db)
            .await
    }

    /// Overwrites every editable field of a branch
    ///
    /// Returns `None` if the branch does not exist.
    pub async fn update(
        &self,
        branch_id: i32,
        params: BranchParams,
    ) -> Result<Option<entity::branch::Model>, DbErr> {
        let Some(branch) = self.get(branch_id).await? else {
            return Ok(None);
        };

        let mut branch_am = branch.into_active_model();
        branch_am.name = ActiveValue::Set(params.name);
        branch_am.kind = ActiveValue::Set(params.kind);
        branch_am.address = ActiveValue::Set(params.address);
        branch_am.phone = ActiveValue::Set(params.phone);
        branch_am.manager = ActiveValue::Set(params.manager);
        branch_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let branch = branch_am.update(self.db).await?;

        Ok(Some(branch))
    }

    /// Deletes a branch along with its staff, their work logs and its transactions
    ///
    /// Returns OK regardless of the branch existing, check [`DeleteResult::rows_affected`].
    pub async fn delete(&self, branch_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Branch::delete_by_id(branch_id)
            .exec(self.db)
            .await
    }

    /// Branches ordered by name descending, 1-based `page`
    pub async fn list(
        &self,
        filter: &BranchFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<entity::branch::Model>, DbErr> {
        let paginator = entity::prelude::Branch::find()
            .filter(filter.condition())
            .order_by_desc(entity::branch::Column::Name)
            .order_by_desc(entity::branch::Column::Id)
            .paginate(self.db, per_page);

        fetch_page(paginator, page, per_page).await
    }

    /// Every branch ordered by name, used for choice lists
    pub async fn all(&self) -> Result<Vec<entity::branch::Model>, DbErr> {
        entity::prelude::Branch::find()
            .order_by_asc(entity::branch::Column::Name)
            .order_by_asc(entity::branch::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_many(
        &self,
        branch_ids: &[i32],
    ) -> Result<HashMap<i32, entity::branch::Model>, DbErr> {
        if branch_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let branches = entity::prelude::Branch::find()
            .filter(entity::branch::Column::Id.is_in(branch_ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(branches.into_iter().map(|b| (b.id, b)).collect())
    }

    pub async fn count(&self, kind: Option<BranchKind>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Branch::find();
        if let Some(kind) = kind {
            query = query.filter(entity::branch::Column::Kind.eq(kind));
        }

        query.count(self.db).await
    }

    /// Number of staff per branch, branches without staff are absent from the map
    pub async fn staff_counts(&self, branch_ids: &[i32]) -> Result<HashMap<i32, u64>, DbErr> {
        if branch_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let counts = entity::prelude::Staff::find()
            .select_only()
            .column(entity::staff::Column::BranchId)
            .column_as(entity::staff::Column::Id.count(), "staff_count")
            .filter(entity::staff::Column::BranchId.is_in(branch_ids.iter().copied()))
            .group_by(entity::staff::Column::BranchId)
            .into_tuple::<(i32, i64)>()
            .all(self.db)
            .await?;

        Ok(counts
            .into_iter()
            .map(|(branch_id, count)| (branch_id, count.max(0) as u64))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use entity::branch::BranchKind;

    use super::BranchParams;

    fn params(name: &str) -> BranchParams {
        BranchParams {
            name: name.to_string(),
            kind: BranchKind::Cafe,
            address: "1 Harbour Street".to_string(),
            phone: "555-0100".to_string(),
            manager: "Jane Doe".to_string(),
        }
    }

    mod create {
        use branchdesk_test_utils::prelude::*;

        use super::params;
        use crate::server::data::branch::BranchRepository;

        /// Expect success when creating a new branch
        #[tokio::test]
        async fn creates_branch() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Branch)?;

            let repository = BranchRepository::new(&test.state.db);
            let result = repository.create(params("Harbour")).await;

            assert!(result.is_ok());
            let branch = result.unwrap();
            assert_eq!(branch.name, "Harbour");
            assert_eq!(branch.created_at, branch.updated_at);

            Ok(())
        }

        /// Expect Error when the branch table does not exist
        #[tokio::test]
        async fn fails_without_tables() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let repository = BranchRepository::new(&test.state.db);
            let result = repository.create(params("Harbour")).await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod update {
        use branchdesk_test_utils::prelude::*;

        use super::params;
        use crate::server::data::branch::BranchRepository;

        /// Expect updated fields and a refreshed timestamp
        #[tokio::test]
        async fn updates_branch() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::Branch)?;
            let branch = test.branch().insert_branch("Harbour", BranchKind::Cafe).await?;

            let repository = BranchRepository::new(&test.state.db);
            let mut changed = params("Harbour");
            changed.address = "2 Pier Road".to_string();
            let result = repository.update(branch.id, changed).await;

            assert!(result.is_ok());
            let updated = result.unwrap().unwrap();
            assert_eq!(updated.address, "2 Pier Road");
            assert!(updated.updated_at >= branch.updated_at);

            Ok(())
        }

        /// Expect None when the branch does not exist
        #[tokio::test]
        async fn returns_none_for_missing_branch() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Branch)?;

            let repository = BranchRepository::new(&test.state.db);
            let result = repository.update(1, params("Harbour")).await;

            assert!(matches!(result, Ok(None)));

            Ok(())
        }
    }

    mod delete {
        use branchdesk_test_utils::prelude::*;
        use sea_orm::{EntityTrait, PaginatorTrait};

        use crate::server::data::branch::BranchRepository;

        /// Expect staff, their work logs and transactions to be removed with the branch
        #[tokio::test]
        async fn cascades_to_children() -> Result<(), TestError> {
            let mut test = test_setup_with_domain_tables!()?;
            let branch = test.branch().insert_branch("Harbour", BranchKind::Hotel).await?;
            let staff = test.staff().insert_staff(branch.id, "Ada", "Byron", "Clerk").await?;
            test.work_log().insert_work_log(staff.id, date(2025, 1, 2), 800).await?;
            test.transaction()
                .insert_transaction(branch.id, TransactionKind::Income, 1000, date(2025, 1, 2))
                .await?;

            let repository = BranchRepository::new(&test.state.db);
            let result = repository.delete(branch.id).await?;

            assert_eq!(result.rows_affected, 1);
            assert_eq!(entity::prelude::Staff::find().count(&test.state.db).await?, 0);
            assert_eq!(entity::prelude::WorkLog::find().count(&test.state.db).await?, 0);
            assert_eq!(entity::prelude::Transaction::find().count(&test.state.db).await?, 0);

            Ok(())
        }

        /// Expect no rows affected when deleting a branch that does not exist
        #[tokio::test]
        async fn no_rows_for_missing_branch() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::Branch)?;

            let repository = BranchRepository::new(&test.state.db);
            let result = repository.delete(1).await?;

            assert_eq!(result.rows_affected, 0);

            Ok(())
        }
    }

    mod list {
        use branchdesk_test_utils::prelude::*;

        use crate::server::data::branch::{BranchFilter, BranchRepository};

        /// Expect the listing ordered by name descending
        #[tokio::test]
        async fn orders_by_name_descending() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::Branch)?;
            test.branch().insert_branch("Zeytin", BranchKind::Cafe).await?;
            test.branch().insert_branch("Akasya", BranchKind::Hotel).await?;
            test.branch().insert_branch("Mimoza", BranchKind::Cafe).await?;

            let repository = BranchRepository::new(&test.state.db);
            let page = repository.list(&BranchFilter::default(), 1, 10).await?;

            let names: Vec<_> = page.items.iter().map(|b| b.name.as_str()).collect();
            assert_eq!(names, vec!["Zeytin", "Mimoza", "Akasya"]);
            assert_eq!(page.total_items, 3);

            Ok(())
        }

        /// Expect a case-insensitive name search
        #[tokio::test]
        async fn filters_by_name() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::Branch)?;
            test.branch().insert_branch("Harbour Cafe", BranchKind::Cafe).await?;
            test.branch().insert_branch("Hill Hotel", BranchKind::Hotel).await?;

            let repository = BranchRepository::new(&test.state.db);
            let filter = BranchFilter {
                q: Some("HARBOUR".to_string()),
            };
            let page = repository.list(&filter, 1, 10).await?;

            assert_eq!(page.items.len(), 1);
            assert_eq!(page.items[0].name, "Harbour Cafe");

            Ok(())
        }

        /// Expect page numbers past the end to clamp to the last page
        #[tokio::test]
        async fn clamps_page() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::Branch)?;
            for i in 0..12 {
                test.branch()
                    .insert_branch(&format!("Branch {i:02}"), BranchKind::Cafe)
                    .await?;
            }

            let repository = BranchRepository::new(&test.state.db);
            let page = repository.list(&BranchFilter::default(), 9, 10).await?;

            assert_eq!(page.page, 2);
            assert_eq!(page.items.len(), 2);

            Ok(())
        }
    }

    mod staff_counts {
        use branchdesk_test_utils::prelude::*;

        use crate::server::data::branch::BranchRepository;

        /// Expect staff to be counted per branch
        #[tokio::test]
        async fn counts_staff_per_branch() -> Result<(), TestError> {
            let mut test =
                test_setup_with_tables!(entity::prelude::Branch, entity::prelude::Staff)?;
            let first = test.branch().insert_branch("First", BranchKind::Cafe).await?;
            let second = test.branch().insert_branch("Second", BranchKind::Cafe).await?;
            test.staff().insert_staff(first.id, "Ada", "Byron", "Clerk").await?;
            test.staff().insert_staff(first.id, "Alan", "Turing", "Cook").await?;

            let repository = BranchRepository::new(&test.state.db);
            let counts = repository.staff_counts(&[first.id, second.id]).await?;

            assert_eq!(counts.get(&first.id), Some(&2));
            assert_eq!(counts.get(&second.id), None);

            Ok(())
        }
    }
}
