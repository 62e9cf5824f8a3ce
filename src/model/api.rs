use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// The response when a submitted form fails validation
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorDto {
    /// Messages keyed by form field name
    pub errors: BTreeMap<String, Vec<String>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Warning,
    Error,
}

/// One-shot message stored in the session until the next listing is rendered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashDto {
    pub level: FlashLevel,
    pub message: String,
}

/// Position of a listing page within its result set
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationDto {
    /// 1-based page number after clamping
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    /// Always at least 1, even for an empty result
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Selectable option for a form field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChoiceDto {
    pub value: String,
    pub label: String,
}

/// Income, expense and their difference
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MoneyTotalsDto {
    #[schema(value_type = String)]
    pub income: Decimal,
    #[schema(value_type = String)]
    pub expense: Decimal,
    #[schema(value_type = String)]
    pub net: Decimal,
}

/// Summary of a record shown before it is deleted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmationDto {
    pub id: i32,
    pub summary: String,
}
