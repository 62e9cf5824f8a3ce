use sea_orm::ConnectionTrait;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::server::{
    data::{branch::BranchRepository, staff::StaffParams},
    error::{form::FormErrors, Error},
    form::{clean_text, merge_validation, parse_choice_id, parse_date, require, INVALID_CHOICE},
};

/// Submitted staff fields
#[derive(Clone, Debug, Default, Deserialize, ToSchema, Validate)]
pub struct StaffForm {
    /// ID of the branch the staff member works at
    pub branch: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub last_name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub position: Option<String>,
    /// `YYYY-MM-DD`
    pub hire_date: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 20, message = "Ensure this value has at most 20 characters.")
    )]
    pub phone: Option<String>,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this value has at most 254 characters.")
    )]
    pub email: Option<String>,
}

impl StaffForm {
    /// Validates the submission, checking the selected branch exists
    pub async fn clean<C: ConnectionTrait>(self, db: &C) -> Result<StaffParams, Error> {
        let form = Self {
            branch: clean_text(self.branch),
            first_name: clean_text(self.first_name),
            last_name: clean_text(self.last_name),
            position: clean_text(self.position),
            hire_date: clean_text(self.hire_date),
            phone: clean_text(self.phone),
            email: clean_text(self.email),
        };

        let mut errors = FormErrors::new();
        merge_validation(&mut errors, form.validate());

        let branch = form.branch.as_deref();
        let parsed = parse_choice_id(&mut errors, "branch", branch);
        let mut branch_id = require(&mut errors, "branch", branch, parsed);
        if let Some(id) = branch_id {
            if BranchRepository::new(db).get(id).await?.is_none() {
                errors.add("branch", INVALID_CHOICE);
                branch_id = None;
            }
        }

        let parsed = parse_date(&mut errors, "hire_date", form.hire_date.as_deref());
        let hire_date = require(&mut errors, "hire_date", form.hire_date.as_deref(), parsed);

        match (
            branch_id,
            form.first_name,
            form.last_name,
            form.position,
            hire_date,
            form.phone,
        ) {
            (
                Some(branch_id),
                Some(first_name),
                Some(last_name),
                Some(position),
                Some(hire_date),
                Some(phone),
            ) if errors.is_empty() => Ok(StaffParams {
                branch_id,
                first_name,
                last_name,
                position,
                hire_date,
                phone,
                email: form.email,
            }),
            _ => Err(errors.into()),
        }
    }
}
