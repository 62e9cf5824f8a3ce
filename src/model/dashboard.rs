use chrono::NaiveDate;
use entity::branch::BranchKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::MoneyTotalsDto;

/// A calendar month and its half-open date range
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PeriodDto {
    pub year: i32,
    pub month: u32,
    pub start: NaiveDate,
    /// Exclusive upper bound, the first day of the following month
    pub end: NaiveDate,
    pub previous: MonthDto,
    pub next: MonthDto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthDto {
    pub year: i32,
    pub month: u32,
}

/// Income and expense of one branch within the selected month
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BranchPeriodDto {
    pub branch_id: i32,
    pub name: String,
    #[schema(value_type = String)]
    pub kind: BranchKind,
    #[schema(value_type = String)]
    pub income: Decimal,
    #[schema(value_type = String)]
    pub expense: Decimal,
    #[schema(value_type = String)]
    pub net: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub period: PeriodDto,
    pub branch_count: u64,
    pub staff_count: u64,
    pub cafe_count: u64,
    pub hotel_count: u64,
    pub cafe_staff_count: u64,
    pub hotel_staff_count: u64,
    /// All-time totals across every branch
    pub totals: MoneyTotalsDto,
    pub cafe_totals: MoneyTotalsDto,
    pub hotel_totals: MoneyTotalsDto,
    pub branches: Vec<BranchPeriodDto>,
}
