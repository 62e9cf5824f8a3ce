use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    api::{ChoiceDto, FlashDto, PaginationDto},
    dashboard::PeriodDto,
};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkLogDto {
    pub id: i32,
    pub staff_id: i32,
    pub staff_name: String,
    pub branch_id: i32,
    pub branch_name: String,
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub hours: Decimal,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Hour statistics over the filtered work logs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkLogStatsDto {
    #[schema(value_type = String)]
    pub total_hours: Decimal,
    pub staff_count: u64,
    /// Total hours divided by the number of distinct staff, zero without staff
    #[schema(value_type = String)]
    pub average_hours: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkLogListDto {
    pub work_logs: Vec<WorkLogDto>,
    pub stats: WorkLogStatsDto,
    pub period: PeriodDto,
    pub staff: Option<i32>,
    pub branch: Option<i32>,
    pub q: Option<String>,
    pub staff_choices: Vec<ChoiceDto>,
    pub branch_choices: Vec<ChoiceDto>,
    pub pagination: PaginationDto,
    pub messages: Vec<FlashDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkLogFormDto {
    pub work_log: Option<WorkLogDto>,
    pub date: NaiveDate,
    /// Branch whose staff populate `staff_choices`
    pub branch: Option<i32>,
    pub branch_choices: Vec<ChoiceDto>,
    pub staff_choices: Vec<ChoiceDto>,
}
