//! Service layer for business logic and orchestration.
//!
//! Services coordinate the repositories of the data layer and shape their results into the
//! DTOs returned by the controllers: annotated listings, form initial state, delete
//! confirmations and the dashboard report.

pub mod auth;
pub mod branch;
pub mod report;
pub mod staff;
pub mod transaction;
pub mod work_log;

use crate::{
    model::api::{ChoiceDto, MoneyTotalsDto},
    server::{
        model::db::{BranchModel, StaffModel},
        util::money::from_minor_units,
    },
};

/// Income, expense and net from minor unit sums
pub fn money_totals(income: i64, expense: i64) -> MoneyTotalsDto {
    MoneyTotalsDto {
        income: from_minor_units(income),
        expense: from_minor_units(expense),
        net: from_minor_units(income - expense),
    }
}

pub fn branch_choices(branches: &[BranchModel]) -> Vec<ChoiceDto> {
    branches
        .iter()
        .map(|branch| ChoiceDto {
            value: branch.id.to_string(),
            label: branch.name.clone(),
        })
        .collect()
}

pub fn staff_choices(staff: &[StaffModel]) -> Vec<ChoiceDto> {
    staff
        .iter()
        .map(|member| ChoiceDto {
            value: member.id.to_string(),
            label: member.full_name(),
        })
        .collect()
}
