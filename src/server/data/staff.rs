use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use entity::branch::BranchKind;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, DeleteResult, EntityTrait, ExprTrait, IntoActiveModel, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, SelectTwo,
};

use crate::server::data::{fetch_page, icontains, search_term, Page};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaffParams {
    pub branch_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub hire_date: NaiveDate,
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct StaffFilter {
    /// Matched case-insensitively against first name, last name and position
    pub q: Option<String>,
    pub branch_id: Option<i32>,
}

impl StaffFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(q) = search_term(self.q.as_deref()) {
            condition = condition.add(icontains(
                vec![
                    Expr::col((entity::prelude::Staff, entity::staff::Column::FirstName)).into(),
                    Expr::col((entity::prelude::Staff, entity::staff::Column::LastName)).into(),
                    Expr::col((entity::prelude::Staff, entity::staff::Column::Position)).into(),
                ],
                q,
            ));
        }

        if let Some(branch_id) = self.branch_id {
            condition = condition.add(entity::staff::Column::BranchId.eq(branch_id));
        }

        condition
    }
}

pub type StaffWithBranch = (entity::staff::Model, Option<entity::branch::Model>);

pub struct StaffRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StaffRepository<'a, C> {
    /// Creates a new instance of [`StaffRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: StaffParams) -> Result<entity::staff::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let staff = entity::staff::ActiveModel {
            branch_id: ActiveValue::Set(params.branch_id),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            position: ActiveValue::Set(params.position),
            hire_date: ActiveValue::Set(params.hire_date),
            phone: ActiveValue::Set(params.phone),
            email: ActiveValue::Set(params.email),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        staff.insert(self.db).await
    }

    pub async fn get(&self, staff_id: i32) -> Result<Option<entity::staff::Model>, DbErr> {
        entity::prelude::Staff::find_by_id(staff_id)
            .one(self.db)
            .await
    }

    pub async fn get_with_branch(&self, staff_id: i32) -> Result<Option<StaffWithBranch>, DbErr> {
        entity::prelude::Staff::find_by_id(staff_id)
            .find_also_related(entity::prelude::Branch)
            .one(self.db)
            .await
    }

    /// Returns `None` if the staff member does not exist
    pub async fn update(
        &self,
        staff_id: i32,
        params: StaffParams,
    ) -> Result<Option<entity::staff::Model>, DbErr> {
        let Some(staff) = self.get(staff_id).await? else {
            return Ok(None);
        };

        let mut staff_am = staff.into_active_model();
        staff_am.branch_id = ActiveValue::Set(params.branch_id);
        staff_am.first_name = ActiveValue::Set(params.first_name);
        staff_am.last_name = ActiveValue::Set(params.last_name);
        staff_am.position = ActiveValue::Set(params.position);
        staff_am.hire_date = ActiveValue::Set(params.hire_date);
        staff_am.phone = ActiveValue::Set(params.phone);
        staff_am.email = ActiveValue::Set(params.email);
        staff_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let staff = staff_am.update(self.db).await?;

        Ok(Some(staff))
    }

    /// Deletes a staff member and their work logs
    pub async fn delete(&self, staff_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Staff::delete_by_id(staff_id)
            .exec(self.db)
            .await
    }

    fn filtered(
        &self,
        filter: &StaffFilter,
    ) -> SelectTwo<entity::staff::Entity, entity::branch::Entity> {
        entity::prelude::Staff::find()
            .find_also_related(entity::prelude::Branch)
            .filter(filter.condition())
            .order_by_asc(entity::staff::Column::FirstName)
            .order_by_asc(entity::staff::Column::LastName)
            .order_by_asc(entity::staff::Column::Id)
    }

    /// Staff ordered by first and last name, 1-based `page`
    pub async fn list(
        &self,
        filter: &StaffFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<StaffWithBranch>, DbErr> {
        let paginator = self.filtered(filter).paginate(self.db, per_page);

        fetch_page(paginator, page, per_page).await
    }

    /// Every staff member matching `filter`, for printing and exports
    pub async fn list_all(&self, filter: &StaffFilter) -> Result<Vec<StaffWithBranch>, DbErr> {
        self.filtered(filter).all(self.db).await
    }

    /// Staff of a single branch ordered by name
    pub async fn by_branch(&self, branch_id: i32) -> Result<Vec<entity::staff::Model>, DbErr> {
        Self::ordered(entity::prelude::Staff::find())
            .filter(entity::staff::Column::BranchId.eq(branch_id))
            .all(self.db)
            .await
    }

    pub async fn all(&self) -> Result<Vec<entity::staff::Model>, DbErr> {
        Self::ordered(entity::prelude::Staff::find())
            .all(self.db)
            .await
    }

    fn ordered(select: Select<entity::staff::Entity>) -> Select<entity::staff::Entity> {
        select
            .order_by_asc(entity::staff::Column::FirstName)
            .order_by_asc(entity::staff::Column::LastName)
            .order_by_asc(entity::staff::Column::Id)
    }

    pub async fn get_many(
        &self,
        staff_ids: &[i32],
    ) -> Result<HashMap<i32, entity::staff::Model>, DbErr> {
        if staff_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let staff = entity::prelude::Staff::find()
            .filter(entity::staff::Column::Id.is_in(staff_ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(staff.into_iter().map(|s| (s.id, s)).collect())
    }

    /// Counts staff, optionally only those working at branches of `kind`
    pub async fn count(&self, kind: Option<BranchKind>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Staff::find();
        if let Some(kind) = kind {
            query = query
                .join(JoinType::InnerJoin, entity::staff::Relation::Branch.def())
                .filter(entity::branch::Column::Kind.eq(kind));
        }

        query.count(self.db).await
    }

    /// All-time logged hundredths of an hour per staff member
    pub async fn total_hours(&self, staff_ids: &[i32]) -> Result<HashMap<i32, i64>, DbErr> {
        if staff_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let totals = entity::prelude::WorkLog::find()
            .select_only()
            .column(entity::work_log::Column::StaffId)
            .column_as(
                entity::work_log::Column::HoursHundredths
                    .sum()
                    .cast_as("BIGINT"),
                "total_hours",
            )
            .filter(entity::work_log::Column::StaffId.is_in(staff_ids.iter().copied()))
            .group_by(entity::work_log::Column::StaffId)
            .into_tuple::<(i32, Option<i64>)>()
            .all(self.db)
            .await?;

        Ok(totals
            .into_iter()
            .map(|(staff_id, total)| (staff_id, total.unwrap_or(0)))
            .collect())
    }
}
