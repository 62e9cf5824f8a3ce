use chrono::{NaiveDate, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, DeleteResult, EntityTrait, ExprTrait, IntoActiveModel, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, SelectTwo,
};

use crate::server::data::{fetch_page, icontains, search_term, Page};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkLogParams {
    pub staff_id: i32,
    pub date: NaiveDate,
    pub hours_hundredths: i64,
    pub description: String,
}

/// Filters combined with AND, absent fields are ignored
#[derive(Clone, Debug, Default)]
pub struct WorkLogFilter {
    /// Inclusive lower date bound
    pub start: Option<NaiveDate>,
    /// Exclusive upper date bound
    pub end: Option<NaiveDate>,
    pub staff_id: Option<i32>,
    /// Branch of the staff member
    pub branch_id: Option<i32>,
    /// Matched case-insensitively against staff first name, last name and the description
    pub q: Option<String>,
}

impl WorkLogFilter {
    /// Condition over `work_log` joined with `staff`
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(start) = self.start {
            condition = condition.add(entity::work_log::Column::Date.gte(start));
        }
        if let Some(end) = self.end {
            condition = condition.add(entity::work_log::Column::Date.lt(end));
        }
        if let Some(staff_id) = self.staff_id {
            condition = condition.add(entity::work_log::Column::StaffId.eq(staff_id));
        }
        if let Some(branch_id) = self.branch_id {
            condition = condition.add(entity::staff::Column::BranchId.eq(branch_id));
        }
        if let Some(q) = search_term(self.q.as_deref()) {
            condition = condition.add(icontains(
                vec![
                    Expr::col((entity::prelude::Staff, entity::staff::Column::FirstName)).into(),
                    Expr::col((entity::prelude::Staff, entity::staff::Column::LastName)).into(),
                    Expr::col((entity::prelude::WorkLog, entity::work_log::Column::Description))
                        .into(),
                ],
                q,
            ));
        }

        condition
    }
}

pub type WorkLogWithStaff = (entity::work_log::Model, Option<entity::staff::Model>);

pub struct WorkLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WorkLogRepository<'a, C> {
    /// Creates a new instance of [`WorkLogRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: WorkLogParams) -> Result<entity::work_log::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let work_log = entity::work_log::ActiveModel {
            staff_id: ActiveValue::Set(params.staff_id),
            date: ActiveValue::Set(params.date),
            hours_hundredths: ActiveValue::Set(params.hours_hundredths),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        work_log.insert(self.db).await
    }

    pub async fn get(&self, work_log_id: i32) -> Result<Option<entity::work_log::Model>, DbErr> {
        entity::prelude::WorkLog::find_by_id(work_log_id)
            .one(self.db)
            .await
    }

    pub async fn get_with_staff(
        &self,
        work_log_id: i32,
    ) -> Result<Option<WorkLogWithStaff>, DbErr> {
        entity::prelude::WorkLog::find_by_id(work_log_id)
            .find_also_related(entity::prelude::Staff)
            .one(self.db)
            .await
    }

    /// Returns `None` if the work log does not exist
    pub async fn update(
        &self,
        work_log_id: i32,
        params: WorkLogParams,
    ) -> Result<Option<entity::work_log::Model>, DbErr> {
        let Some(work_log) = self.get(work_log_id).await? else {
            return Ok(None);
        };

        let mut work_log_am = work_log.into_active_model();
        work_log_am.staff_id = ActiveValue::Set(params.staff_id);
        work_log_am.date = ActiveValue::Set(params.date);
        work_log_am.hours_hundredths = ActiveValue::Set(params.hours_hundredths);
        work_log_am.description = ActiveValue::Set(params.description);
        work_log_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let work_log = work_log_am.update(self.db).await?;

        Ok(Some(work_log))
    }

    pub async fn delete(&self, work_log_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::WorkLog::delete_by_id(work_log_id)
            .exec(self.db)
            .await
    }

    fn filtered(
        &self,
        filter: &WorkLogFilter,
    ) -> SelectTwo<entity::work_log::Entity, entity::staff::Entity> {
        entity::prelude::WorkLog::find()
            .find_also_related(entity::prelude::Staff)
            .filter(filter.condition())
            .order_by_desc(entity::work_log::Column::Date)
            .order_by_desc(entity::work_log::Column::HoursHundredths)
            .order_by_desc(entity::work_log::Column::Id)
    }

    /// Work logs newest first, longer shifts first within a day, 1-based `page`
    pub async fn list(
        &self,
        filter: &WorkLogFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<WorkLogWithStaff>, DbErr> {
        let paginator = self.filtered(filter).paginate(self.db, per_page);

        fetch_page(paginator, page, per_page).await
    }

    pub async fn list_all(&self, filter: &WorkLogFilter) -> Result<Vec<WorkLogWithStaff>, DbErr> {
        self.filtered(filter).all(self.db).await
    }

    fn joined(filter: &WorkLogFilter) -> Select<entity::work_log::Entity> {
        entity::prelude::WorkLog::find()
            .join(JoinType::InnerJoin, entity::work_log::Relation::Staff.def())
            .filter(filter.condition())
    }

    /// Sum of hundredths of an hour over the matching work logs, zero when none match
    pub async fn total_hours(&self, filter: &WorkLogFilter) -> Result<i64, DbErr> {
        let total = Self::joined(filter)
            .select_only()
            .column_as(
                entity::work_log::Column::HoursHundredths
                    .sum()
                    .cast_as("BIGINT"),
                "total_hours",
            )
            .into_tuple::<Option<i64>>()
            .one(self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0))
    }

    /// Number of distinct staff members among the matching work logs
    pub async fn staff_count(&self, filter: &WorkLogFilter) -> Result<u64, DbErr> {
        Self::joined(filter)
            .select_only()
            .column(entity::work_log::Column::StaffId)
            .distinct()
            .count(self.db)
            .await
    }

    /// `(staff_id, hundredths)` per staff member, highest total first
    pub async fn hours_by_staff(&self, filter: &WorkLogFilter) -> Result<Vec<(i32, i64)>, DbErr> {
        let totals = Self::joined(filter)
            .select_only()
            .column(entity::work_log::Column::StaffId)
            .column_as(
                entity::work_log::Column::HoursHundredths
                    .sum()
                    .cast_as("BIGINT"),
                "total_hours",
            )
            .group_by(entity::work_log::Column::StaffId)
            .order_by_desc(entity::work_log::Column::HoursHundredths.sum())
            .order_by_asc(entity::work_log::Column::StaffId)
            .into_tuple::<(i32, Option<i64>)>()
            .all(self.db)
            .await?;

        Ok(totals
            .into_iter()
            .map(|(staff_id, total)| (staff_id, total.unwrap_or(0)))
            .collect())
    }
}
