use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::DeleteConfirmationDto,
        staff::{
            StaffByBranchDto, StaffDto, StaffFormDto, StaffListDto, StaffOptionDto,
            StaffSummaryDto,
        },
    },
    server::{
        data::{
            branch::BranchRepository,
            staff::{StaffFilter, StaffParams, StaffRepository},
        },
        error::Error,
        model::db::{BranchModel, StaffModel},
        service::branch_choices,
        util::{money::from_minor_units, pagination::pagination_dto},
    },
};

pub const STAFF_PER_PAGE: u64 = 15;

pub fn staff_dto(staff: StaffModel, branch: Option<&BranchModel>) -> StaffDto {
    StaffDto {
        full_name: staff.full_name(),
        id: staff.id,
        branch_id: staff.branch_id,
        branch_name: branch.map(|b| b.name.clone()).unwrap_or_default(),
        first_name: staff.first_name,
        last_name: staff.last_name,
        position: staff.position,
        hire_date: staff.hire_date,
        phone: staff.phone,
        email: staff.email,
        created_at: staff.created_at,
        updated_at: staff.updated_at,
    }
}

pub struct StaffService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StaffService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists staff by name, each annotated with their all-time logged hours
    pub async fn list(&self, filter: StaffFilter, page: u64) -> Result<StaffListDto, Error> {
        let staff_repo = StaffRepository::new(self.db);

        let page = staff_repo.list(&filter, page, STAFF_PER_PAGE).await?;
        let ids: Vec<i32> = page.items.iter().map(|(s, _)| s.id).collect();
        let hours = staff_repo.total_hours(&ids).await?;
        let branches = BranchRepository::new(self.db).all().await?;

        let pagination = pagination_dto(page.page, page.per_page, page.total_items);
        let staff = page
            .items
            .into_iter()
            .map(|(staff, branch)| StaffSummaryDto {
                total_hours: from_minor_units(hours.get(&staff.id).copied().unwrap_or(0)),
                staff: staff_dto(staff, branch.as_ref()),
            })
            .collect();

        Ok(StaffListDto {
            staff,
            q: filter.q,
            branch: filter.branch_id,
            branch_choices: branch_choices(&branches),
            pagination,
            messages: Vec::new(),
        })
    }

    /// Every staff member matching `filter` with their hours, for printing and exports
    pub async fn list_all(&self, filter: &StaffFilter) -> Result<Vec<StaffSummaryDto>, Error> {
        let staff_repo = StaffRepository::new(self.db);

        let staff = staff_repo.list_all(filter).await?;
        let ids: Vec<i32> = staff.iter().map(|(s, _)| s.id).collect();
        let hours = staff_repo.total_hours(&ids).await?;

        Ok(staff
            .into_iter()
            .map(|(staff, branch)| StaffSummaryDto {
                total_hours: from_minor_units(hours.get(&staff.id).copied().unwrap_or(0)),
                staff: staff_dto(staff, branch.as_ref()),
            })
            .collect())
    }

    pub async fn get(&self, staff_id: i32) -> Result<StaffDto, Error> {
        let (staff, branch) = StaffRepository::new(self.db)
            .get_with_branch(staff_id)
            .await?
            .ok_or_else(|| Error::not_found("Staff", staff_id))?;

        Ok(staff_dto(staff, branch.as_ref()))
    }

    pub async fn create(&self, params: StaffParams) -> Result<StaffDto, Error> {
        let staff = StaffRepository::new(self.db).create(params).await?;

        tracing::info!(staff_id = staff.id, branch_id = staff.branch_id, "Created staff member");

        self.get(staff.id).await
    }

    pub async fn update(&self, staff_id: i32, params: StaffParams) -> Result<StaffDto, Error> {
        StaffRepository::new(self.db)
            .update(staff_id, params)
            .await?
            .ok_or_else(|| Error::not_found("Staff", staff_id))?;

        tracing::info!(staff_id, "Updated staff member");

        self.get(staff_id).await
    }

    /// Deletes a staff member along with their work logs
    pub async fn delete(&self, staff_id: i32) -> Result<(), Error> {
        let result = StaffRepository::new(self.db).delete(staff_id).await?;
        if result.rows_affected == 0 {
            return Err(Error::not_found("Staff", staff_id));
        }

        tracing::info!(staff_id, "Deleted staff member");

        Ok(())
    }

    pub async fn delete_confirmation(&self, staff_id: i32) -> Result<DeleteConfirmationDto, Error> {
        let staff = self.get(staff_id).await?;

        Ok(DeleteConfirmationDto {
            id: staff.id,
            summary: format!("{} - {}", staff.full_name, staff.position),
        })
    }

    pub async fn form(&self, staff_id: Option<i32>) -> Result<StaffFormDto, Error> {
        let staff = match staff_id {
            Some(id) => Some(self.get(id).await?),
            None => None,
        };
        let branches = BranchRepository::new(self.db).all().await?;

        Ok(StaffFormDto {
            staff,
            branch_choices: branch_choices(&branches),
        })
    }

    /// Staff options of a branch, empty when no branch was selected
    pub async fn by_branch(&self, branch_id: Option<i32>) -> Result<StaffByBranchDto, Error> {
        let staff = match branch_id {
            Some(branch_id) => StaffRepository::new(self.db).by_branch(branch_id).await?,
            None => Vec::new(),
        };

        Ok(StaffByBranchDto {
            staff: staff
                .into_iter()
                .map(|member| StaffOptionDto {
                    full_name: member.full_name(),
                    id: member.id,
                })
                .collect(),
        })
    }
}
