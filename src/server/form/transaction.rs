use chrono::NaiveDate;
use entity::transaction::{TransactionCategory, TransactionKind};
use sea_orm::ConnectionTrait;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::server::{
    data::{branch::BranchRepository, transaction::TransactionParams},
    error::{form::FormErrors, Error},
    form::{
        clean_text, parse_choice_id, parse_date, parse_enum_choice, parse_minor_units, require,
        INVALID_CHOICE,
    },
};

/// Amounts may not exceed 9,999,999,999.99
const AMOUNT_MAX_DIGITS: u32 = 12;

/// Submitted transaction fields
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct TransactionForm {
    /// ID of the branch the transaction is booked against
    pub branch: Option<String>,
    /// `income` or `expense`
    pub kind: Option<String>,
    /// `cash` when omitted
    pub category: Option<String>,
    pub description: Option<String>,
    /// Decimal amount with at most two places, at least 0.01
    pub amount: Option<String>,
    /// `YYYY-MM-DD`, today when omitted on create
    pub date: Option<String>,
}

impl TransactionForm {
    /// Validates the submission, `is_edit` makes the date mandatory
    pub async fn clean<C: ConnectionTrait>(
        self,
        db: &C,
        is_edit: bool,
        today: NaiveDate,
    ) -> Result<TransactionParams, Error> {
        let branch = clean_text(self.branch);
        let kind = clean_text(self.kind);
        let category = clean_text(self.category);
        let amount = clean_text(self.amount);
        let date = clean_text(self.date);

        let mut errors = FormErrors::new();

        let parsed = parse_choice_id(&mut errors, "branch", branch.as_deref());
        let branch_id = match require(&mut errors, "branch", branch.as_deref(), parsed) {
            Some(id) => {
                let found = BranchRepository::new(db).get(id).await?;
                if found.is_none() {
                    errors.add("branch", INVALID_CHOICE);
                }
                found.map(|branch| branch.id)
            }
            None => None,
        };

        let parsed = parse_enum_choice::<TransactionKind>(&mut errors, "kind", kind.as_deref());
        let kind = require(&mut errors, "kind", kind.as_deref(), parsed);

        let category = match category.as_deref() {
            None => Some(TransactionCategory::default()),
            value => parse_enum_choice::<TransactionCategory>(&mut errors, "category", value),
        };

        let parsed = parse_minor_units(&mut errors, "amount", amount.as_deref(), AMOUNT_MAX_DIGITS);
        let amount_cents = match require(&mut errors, "amount", amount.as_deref(), parsed) {
            Some(value) if value < 1 => {
                errors.add("amount", "Ensure this value is greater than or equal to 0.01.");
                None
            }
            value => value,
        };

        let date = match date.as_deref() {
            None if !is_edit => Some(today),
            value => {
                let parsed = parse_date(&mut errors, "date", value);
                require(&mut errors, "date", value, parsed)
            }
        };

        match (branch_id, kind, category, amount_cents, date) {
            (Some(branch_id), Some(kind), Some(category), Some(amount_cents), Some(date))
                if errors.is_empty() =>
            {
                Ok(TransactionParams {
                    branch_id,
                    kind,
                    category,
                    description: clean_text(self.description).unwrap_or_default(),
                    amount_cents,
                    date,
                })
            }
            _ => Err(errors.into()),
        }
    }
}
