use chrono::NaiveDateTime;
use entity::branch::BranchKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::{ChoiceDto, FlashDto, PaginationDto};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BranchDto {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String, example = "cafe")]
    pub kind: BranchKind,
    pub address: String,
    pub phone: String,
    pub manager: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A branch row in the listing, annotated with all-time figures
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BranchSummaryDto {
    #[serde(flatten)]
    pub branch: BranchDto,
    pub staff_count: u64,
    #[schema(value_type = String)]
    pub total_income: Decimal,
    #[schema(value_type = String)]
    pub total_expense: Decimal,
    #[schema(value_type = String)]
    pub net: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BranchListDto {
    pub branches: Vec<BranchSummaryDto>,
    pub q: Option<String>,
    pub pagination: PaginationDto,
    pub messages: Vec<FlashDto>,
}

/// Initial state of the branch create/edit form
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BranchFormDto {
    /// Present when editing an existing branch
    pub branch: Option<BranchDto>,
    #[schema(value_type = String)]
    pub kind: BranchKind,
    pub kind_choices: Vec<ChoiceDto>,
}
