use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::{ChoiceDto, FlashDto, PaginationDto};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffDto {
    pub id: i32,
    pub branch_id: i32,
    pub branch_name: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub position: String,
    pub hire_date: NaiveDate,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A staff row in the listing with total logged hours
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffSummaryDto {
    #[serde(flatten)]
    pub staff: StaffDto,
    #[schema(value_type = String)]
    pub total_hours: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffListDto {
    pub staff: Vec<StaffSummaryDto>,
    pub q: Option<String>,
    pub branch: Option<i32>,
    pub branch_choices: Vec<ChoiceDto>,
    pub pagination: PaginationDto,
    pub messages: Vec<FlashDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffFormDto {
    pub staff: Option<StaffDto>,
    pub branch_choices: Vec<ChoiceDto>,
}

/// Staff option returned when a branch is picked in the work log form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaffOptionDto {
    pub id: i32,
    pub full_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffByBranchDto {
    pub staff: Vec<StaffOptionDto>,
}
