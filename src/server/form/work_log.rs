use chrono::NaiveDate;
use sea_orm::ConnectionTrait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::server::{
    data::{branch::BranchRepository, staff::StaffRepository, work_log::WorkLogParams},
    error::{form::FormErrors, Error},
    form::{
        clean_text, parse_choice_id, parse_date, parse_minor_units, require, INVALID_CHOICE,
        REQUIRED,
    },
    model::db::WorkLogModel,
};

/// Hours may not exceed 999.99
const HOURS_MAX_DIGITS: u32 = 5;

/// Submitted work log fields
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct WorkLogForm {
    /// ID of the branch whose staff may be selected
    pub branch: Option<String>,
    /// ID of a staff member of `branch`
    pub staff: Option<String>,
    /// `YYYY-MM-DD`, today when omitted on create
    pub date: Option<String>,
    /// Decimal hours with at most two places
    pub hours: Option<String>,
    pub description: Option<String>,
}

impl WorkLogForm {
    /// Validates the submission.
    ///
    /// The staff member must belong to the branch selected in the same submission. When editing
    /// `existing` without a branch in the submission, the staff member's current branch is used
    /// instead. An unparsable or unknown branch leaves no staff to choose from.
    pub async fn clean<C: ConnectionTrait>(
        self,
        db: &C,
        existing: Option<&WorkLogModel>,
        today: NaiveDate,
    ) -> Result<WorkLogParams, Error> {
        let branch = clean_text(self.branch);
        let staff = clean_text(self.staff);
        let date = clean_text(self.date);
        let hours = clean_text(self.hours);

        let mut errors = FormErrors::new();
        let staff_repository = StaffRepository::new(db);

        let branch_id = match (branch.as_deref(), existing) {
            (Some(value), _) => {
                match parse_choice_id(&mut errors, "branch", Some(value)) {
                    Some(id) => {
                        let found = BranchRepository::new(db).get(id).await?;
                        if found.is_none() {
                            errors.add("branch", INVALID_CHOICE);
                        }
                        found.map(|branch| branch.id)
                    }
                    None => None,
                }
            }
            (None, Some(work_log)) => staff_repository
                .get(work_log.staff_id)
                .await?
                .map(|staff| staff.branch_id),
            (None, None) => {
                errors.add("branch", REQUIRED);
                None
            }
        };

        let allowed: Vec<i32> = match branch_id {
            Some(branch_id) => staff_repository
                .by_branch(branch_id)
                .await?
                .into_iter()
                .map(|staff| staff.id)
                .collect(),
            None => Vec::new(),
        };

        let parsed = parse_choice_id(&mut errors, "staff", staff.as_deref());
        let staff_id = match require(&mut errors, "staff", staff.as_deref(), parsed) {
            Some(id) if allowed.contains(&id) => Some(id),
            Some(_) => {
                errors.add("staff", INVALID_CHOICE);
                None
            }
            None => None,
        };

        let date = match date.as_deref() {
            None if existing.is_none() => Some(today),
            value => {
                let parsed = parse_date(&mut errors, "date", value);
                require(&mut errors, "date", value, parsed)
            }
        };

        let parsed = parse_minor_units(&mut errors, "hours", hours.as_deref(), HOURS_MAX_DIGITS);
        let hours_hundredths = match require(&mut errors, "hours", hours.as_deref(), parsed) {
            Some(value) if value < 0 => {
                errors.add("hours", "Ensure this value is greater than or equal to 0.");
                None
            }
            value => value,
        };

        match (staff_id, date, hours_hundredths) {
            (Some(staff_id), Some(date), Some(hours_hundredths)) if errors.is_empty() => {
                Ok(WorkLogParams {
                    staff_id,
                    date,
                    hours_hundredths,
                    description: clean_text(self.description).unwrap_or_default(),
                })
            }
            _ => Err(errors.into()),
        }
    }
}
