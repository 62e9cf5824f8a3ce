use chrono::{NaiveDate, NaiveDateTime};
use entity::transaction::{TransactionCategory, TransactionKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::{ChoiceDto, FlashDto, MoneyTotalsDto, PaginationDto};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionDto {
    pub id: i32,
    pub branch_id: i32,
    pub branch_name: String,
    #[schema(value_type = String, example = "income")]
    pub kind: TransactionKind,
    #[schema(value_type = String, example = "cash")]
    pub category: TransactionCategory,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionListDto {
    pub transactions: Vec<TransactionDto>,
    /// Totals over every transaction matching the filters, not just this page
    pub totals: MoneyTotalsDto,
    #[schema(value_type = Option<String>)]
    pub kind: Option<TransactionKind>,
    pub branch: Option<i32>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub branch_choices: Vec<ChoiceDto>,
    pub pagination: PaginationDto,
    pub messages: Vec<FlashDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionFormDto {
    pub transaction: Option<TransactionDto>,
    pub date: NaiveDate,
    pub branch_choices: Vec<ChoiceDto>,
    pub kind_choices: Vec<ChoiceDto>,
    pub category_choices: Vec<ChoiceDto>,
}
